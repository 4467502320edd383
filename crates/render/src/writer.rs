use crate::RenderError;
use lopdf::content::Content;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// Collects PDF objects in memory and serializes them in one pass.
///
/// The catalog, page tree and shared resources get fixed ids up front so
/// page dictionaries can reference them before they are written.
pub struct PdfWriter {
    document: Document,
    pub catalog_id: ObjectId,
    pub pages_id: ObjectId,
    pub resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    outline_root_id: Option<ObjectId>,
    info_id: Option<ObjectId>,
}

impl PdfWriter {
    pub fn new(version: &str) -> Self {
        let mut document = Document::with_version(version);
        let resources_id = document.new_object_id();
        let pages_id = document.new_object_id();
        let catalog_id = document.new_object_id();
        document
            .objects
            .insert(resources_id, dictionary! {}.into());

        Self {
            document,
            catalog_id,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            outline_root_id: None,
            info_id: None,
        }
    }

    pub fn new_object_id(&mut self) -> ObjectId {
        self.document.new_object_id()
    }

    pub fn buffer_object(&mut self, object: Object) -> ObjectId {
        self.document.add_object(object)
    }

    pub fn buffer_object_at_id(&mut self, id: ObjectId, object: Object) {
        if id.0 > self.document.max_id {
            self.document.max_id = id.0;
        }
        self.document.objects.insert(id, object);
    }

    pub fn buffer_content_stream(&mut self, content: Content) -> Result<ObjectId, RenderError> {
        let stream = Stream::new(dictionary! {}, content.encode()?);
        Ok(self.buffer_object(Object::Stream(stream)))
    }

    pub fn set_resources(&mut self, resources: Dictionary) {
        self.buffer_object_at_id(self.resources_id, resources.into());
    }

    /// Appends a page referencing the shared resources.
    pub fn add_page(&mut self, content_id: ObjectId, width: f32, height: f32) -> ObjectId {
        let page = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let id = self.buffer_object(page.into());
        self.page_ids.push(id);
        id
    }

    pub fn page_ids(&self) -> &[ObjectId] {
        &self.page_ids
    }

    pub fn set_outline_root_id(&mut self, outline_root_id: Option<ObjectId>) {
        self.outline_root_id = outline_root_id;
    }

    pub fn set_info(&mut self, info: Dictionary) {
        self.info_id = Some(self.buffer_object(info.into()));
    }

    pub fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => self.page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => self.page_ids.len() as i64,
        };
        self.buffer_object_at_id(self.pages_id, pages_dict.into());

        let mut catalog_dict = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        if let Some(outline_id) = self.outline_root_id {
            catalog_dict.set("Outlines", outline_id);
            catalog_dict.set("PageMode", "UseOutlines");
        }
        self.buffer_object_at_id(self.catalog_id, catalog_dict.into());

        self.document.trailer.set("Root", self.catalog_id);
        if let Some(info_id) = self.info_id {
            self.document.trailer.set("Info", info_id);
        }

        let mut buffer = Vec::new();
        self.document
            .save_to(&mut buffer)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        log::debug!(
            "Serialized {} page(s), {} objects, {} bytes",
            self.page_ids.len(),
            self.document.objects.len(),
            buffer.len()
        );
        Ok(buffer)
    }
}
