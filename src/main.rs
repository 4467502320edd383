use folio::{parse_content, Document, FolioError, Template};
use std::env;
use std::fs;
use std::path::Path;

/// Builds a PDF from a template description and a content description.
fn main() -> Result<(), FolioError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("Builds a PDF from a JSON template and a JSON content list.");
        eprintln!();
        eprintln!(
            "Usage: {} <path/to/template.json> <path/to/content.json> <path/to/output.pdf>",
            args[0]
        );
        std::process::exit(1);
    }

    let template_path = &args[1];
    let content_path = Path::new(&args[2]);
    let output_path = &args[3];

    log::info!("Loading template from {}", template_path);
    let template = Template::from_json(&fs::read_to_string(template_path)?)?;

    log::info!("Loading content from {}", content_path.display());
    let items = parse_content(&fs::read_to_string(content_path)?)?;

    let mut document = Document::new(template);
    let base_dir = content_path.parent().unwrap_or(Path::new("."));
    document.add_content(&items, base_dir)?;
    document.save_as(output_path)?;

    println!("Successfully generated {}", output_path);
    Ok(())
}
