use dotenv::dotenv;
use income_statement_validator::{
    ArtifactStore, DirectoryArtifactStore, DoclingConverter, LopdfSplicer, OllamaSummarizer,
    StatementValidator, ValidationRequest, ValidatorConfig,
};
use std::error::Error;
use std::path::PathBuf;

/// Usage: validate_batch <submitted-net-income> <report.pdf>...
fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let submitted: f64 = match args.next() {
        Some(value) => value.parse()?,
        None => {
            println!("Usage: validate_batch <submitted-net-income> <report.pdf>...");
            return Ok(());
        }
    };
    let pdf_paths: Vec<PathBuf> = args.map(PathBuf::from).collect();
    if pdf_paths.is_empty() {
        println!("No PDF files given.");
        return Ok(());
    }

    let config = match std::env::var("VALIDATOR_CONFIG") {
        Ok(path) => ValidatorConfig::from_json_file(path)?,
        Err(_) => ValidatorConfig::default(),
    };

    let mut store = DirectoryArtifactStore::temporary()?;
    let mut requests = Vec::new();
    for path in &pdf_paths {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or("PDF path has no usable file name")?;
        store.put(name, std::fs::read(path)?)?;
        requests.push(ValidationRequest::new(name, Some(submitted)));
        println!("Queued {}", name);
    }

    let validator = StatementValidator::new(
        config,
        Box::new(LopdfSplicer),
        Box::new(DoclingConverter::from_env()?),
    )?
    .with_summarizer(Box::new(OllamaSummarizer::from_env()?));

    let report = validator.run(&mut store, &requests);

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
