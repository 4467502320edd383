//! Document outline (bookmarks) built from heading entries.

use crate::writer::PdfWriter;
use folio_layout::encoding::encode_win_ansi;
use folio_types::OutlineEntry;
use lopdf::{dictionary, Object, ObjectId, StringFormat};
use std::collections::HashMap;

/// Entries deeper than this start collapsed in the viewer.
const OPEN_LEVELS: u8 = 2;

struct FlatOutlineItem {
    id: ObjectId,
    level: u8,
    title: String,
    dest: Vec<Object>,
    parent_idx: Option<usize>,
}

struct NodeOutlineItem {
    id: ObjectId,
    level: u8,
    title: String,
    dest: Vec<Object>,
    children: Vec<NodeOutlineItem>,
}

impl NodeOutlineItem {
    fn is_open(&self) -> bool {
        self.level <= OPEN_LEVELS
    }

    /// Descendants shown when this item is expanded.
    fn expanded_count(&self) -> i64 {
        self.children.iter().map(NodeOutlineItem::visible_count).sum()
    }

    /// This item plus whatever of its subtree is currently shown.
    fn visible_count(&self) -> i64 {
        if self.is_open() {
            1 + self.expanded_count()
        } else {
            1
        }
    }
}

/// Writes the outline tree for `entries` and returns the id of the root
/// `Outlines` dictionary, or `None` when there is nothing to bookmark.
pub(crate) fn build_outlines(
    writer: &mut PdfWriter,
    entries: &[OutlineEntry],
    page_ids: &[ObjectId],
    page_height: f32,
) -> Option<ObjectId> {
    let mut flat_list: Vec<FlatOutlineItem> = Vec::new();
    // (level, index into flat_list) of the open ancestors.
    let mut level_stack: Vec<(u8, usize)> = Vec::new();

    for entry in entries {
        let Some(&page_id) = page_ids.get(entry.page_index) else {
            log::warn!("Outline entry '{}' points past the last page", entry.title);
            continue;
        };
        let dest = vec![
            Object::Reference(page_id),
            "FitH".into(),
            (page_height - entry.y).into(),
        ];

        while level_stack.last().is_some_and(|(level, _)| *level >= entry.level) {
            level_stack.pop();
        }
        let parent_idx = level_stack.last().map(|(_, idx)| *idx);
        let new_idx = flat_list.len();
        flat_list.push(FlatOutlineItem {
            id: writer.new_object_id(),
            level: entry.level,
            title: entry.title.clone(),
            dest,
            parent_idx,
        });
        level_stack.push((entry.level, new_idx));
    }

    let mut children_map: HashMap<usize, Vec<NodeOutlineItem>> = HashMap::new();
    let mut root_items = Vec::new();

    for (i, flat_node) in flat_list.into_iter().enumerate().rev() {
        let mut children = children_map.remove(&i).unwrap_or_default();
        children.reverse();
        let node = NodeOutlineItem {
            id: flat_node.id,
            level: flat_node.level,
            title: flat_node.title,
            dest: flat_node.dest,
            children,
        };
        match flat_node.parent_idx {
            Some(parent_idx) => children_map.entry(parent_idx).or_default().push(node),
            None => root_items.push(node),
        }
    }
    root_items.reverse();

    let (first, last) = (root_items.first()?.id, root_items.last()?.id);
    let visible: i64 = root_items.iter().map(NodeOutlineItem::visible_count).sum();
    let outline_root_id = writer.new_object_id();
    writer.buffer_object_at_id(
        outline_root_id,
        dictionary! {
            "Type" => "Outlines", "First" => first, "Last" => last, "Count" => visible,
        }
        .into(),
    );
    buffer_outline_level(&root_items, outline_root_id, writer);
    Some(outline_root_id)
}

fn buffer_outline_level(items: &[NodeOutlineItem], parent_id: ObjectId, writer: &mut PdfWriter) {
    for (i, item) in items.iter().enumerate() {
        let mut dict = dictionary! {
            "Title" => Object::String(encode_win_ansi(&item.title), StringFormat::Literal),
            "Parent" => parent_id,
            "Dest" => item.dest.clone(),
        };
        if i > 0 {
            dict.set("Prev", items[i - 1].id);
        }
        if let Some(next) = items.get(i + 1) {
            dict.set("Next", next.id);
        }
        if let (Some(first), Some(last)) = (item.children.first(), item.children.last()) {
            dict.set("First", first.id);
            dict.set("Last", last.id);
            // Negative count: the entry starts closed.
            let count = item.expanded_count();
            dict.set("Count", if item.is_open() { count } else { -count });
            buffer_outline_level(&item.children, item.id, writer);
        }
        writer.buffer_object_at_id(item.id, dict.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::Content;
    use lopdf::Document;

    fn entry(level: u8, title: &str, page_index: usize) -> OutlineEntry {
        OutlineEntry {
            level,
            title: title.to_string(),
            page_index,
            y: 72.0,
        }
    }

    fn finish_with(entries: &[OutlineEntry], pages: usize) -> (Document, Option<ObjectId>) {
        let mut writer = PdfWriter::new("1.7");
        for _ in 0..pages {
            let content = writer.buffer_content_stream(Content { operations: vec![] }).unwrap();
            writer.add_page(content, 600.0, 800.0);
        }
        let page_ids = writer.page_ids().to_vec();
        let root = build_outlines(&mut writer, entries, &page_ids, 800.0);
        writer.set_outline_root_id(root);
        (Document::load_mem(&writer.finish().unwrap()).unwrap(), root)
    }

    #[test]
    fn test_no_entries_no_outline() {
        let (_, root) = finish_with(&[], 1);
        assert!(root.is_none());
    }

    #[test]
    fn test_nested_entries() {
        let entries = [
            entry(0, "Chapter 1", 0),
            entry(1, "Section 1.1", 0),
            entry(1, "Section 1.2", 1),
            entry(0, "Chapter 2", 1),
        ];
        let (doc, root) = finish_with(&entries, 2);
        let root = doc.get_dictionary(root.unwrap()).unwrap();
        assert_eq!(root.get(b"Count").unwrap().as_i64().unwrap(), 4);

        let first_id = root.get(b"First").unwrap().as_reference().unwrap();
        let chapter = doc.get_dictionary(first_id).unwrap();
        assert_eq!(chapter.get(b"Title").unwrap().as_str().unwrap(), b"Chapter 1");
        assert_eq!(chapter.get(b"Count").unwrap().as_i64().unwrap(), 2);

        let dest = chapter.get(b"Dest").unwrap().as_array().unwrap();
        assert_eq!(dest[1].as_name().unwrap(), b"FitH");
        assert_eq!(dest[2].as_float().unwrap(), 728.0);

        let section_id = chapter.get(b"Last").unwrap().as_reference().unwrap();
        let section = doc.get_dictionary(section_id).unwrap();
        assert_eq!(section.get(b"Title").unwrap().as_str().unwrap(), b"Section 1.2");
        assert_eq!(section.get(b"Parent").unwrap().as_reference().unwrap(), first_id);
    }

    #[test]
    fn test_deep_levels_start_closed() {
        let entries = [
            entry(0, "h1", 0),
            entry(1, "h2", 0),
            entry(2, "h3", 0),
            entry(3, "h4", 0),
            entry(4, "h5", 0),
        ];
        let (doc, root) = finish_with(&entries, 1);
        let root = doc.get_dictionary(root.unwrap()).unwrap();
        // h1, h2, h3 and h4 are shown; h5 hides under the closed h4.
        assert_eq!(root.get(b"Count").unwrap().as_i64().unwrap(), 4);

        let mut counts = Vec::new();
        let mut id = root.get(b"First").unwrap().as_reference().unwrap();
        loop {
            let item = doc.get_dictionary(id).unwrap();
            let Ok(count) = item.get(b"Count") else { break };
            counts.push(count.as_i64().unwrap());
            id = item.get(b"First").unwrap().as_reference().unwrap();
        }
        assert_eq!(counts, vec![3, 2, 1, -1]);
    }

    #[test]
    fn test_entry_past_last_page_is_skipped() {
        let (_, root) = finish_with(&[entry(0, "Ghost", 5)], 1);
        assert!(root.is_none());
    }
}
