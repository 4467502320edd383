use crate::writer::PdfWriter;
use folio_layout::DecodedImage;
use lopdf::{dictionary, Dictionary, Object, Stream};
use std::collections::HashMap;
use std::sync::Arc;

/// Image XObjects, shared between pages. The same decoded image used twice
/// is written once.
#[derive(Debug, Default)]
pub(crate) struct ImageResources {
    /// Resource name per entry of `LayoutOutput::images`.
    names: Vec<String>,
    xobjects: Dictionary,
}

impl ImageResources {
    pub fn write(writer: &mut PdfWriter, images: &[Arc<DecodedImage>]) -> Self {
        let mut written: HashMap<*const DecodedImage, String> = HashMap::new();
        let mut resources = Self::default();

        for image in images {
            let key = Arc::as_ptr(image);
            let name = match written.get(&key) {
                Some(name) => name.clone(),
                None => {
                    let name = format!("Im{}", written.len() + 1);
                    let id = write_image(writer, image);
                    resources.xobjects.set(name.as_bytes(), id);
                    written.insert(key, name.clone());
                    name
                }
            };
            resources.names.push(name);
        }
        resources
    }

    pub fn resource_name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.xobjects.is_empty()
    }

    pub fn into_dictionary(self) -> Dictionary {
        self.xobjects
    }
}

fn write_image(writer: &mut PdfWriter, image: &DecodedImage) -> lopdf::ObjectId {
    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => i64::from(image.width_px),
        "Height" => i64::from(image.height_px),
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };
    if let Some(alpha) = &image.alpha {
        let mask = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(image.width_px),
            "Height" => i64::from(image.height_px),
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
        };
        let mask_id = writer.buffer_object(Object::Stream(Stream::new(mask, alpha.clone())));
        dict.set("SMask", mask_id);
    }
    writer.buffer_object(Object::Stream(Stream::new(dict, image.rgb.clone())))
}
