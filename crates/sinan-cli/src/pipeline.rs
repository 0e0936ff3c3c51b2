//! Import pipeline wiring, stage by stage:
//!
//! 1. **Configure**: load registries, resolve the disease module (fatal if
//!    unknown)
//! 2. **Ingest**: read the notification table and the residence dictionary
//! 3. **Preprocess**: sentinel normalization, optional anonymization
//! 4. **Resolve**: authenticate, resolve the outbreak by name, fetch the
//!    location tree
//! 5. **Convert**: rows → assembled cases (row failures skip, never abort)
//! 6. **Deliver**: optional JSON-lines dump, then the concurrent upsert

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, info_span};

use godata_client::{CaseUploader, GodataClient};
use godata_model::UploadOutcome;
use sinan_ingest::{ResidenceDictionary, read_case_table};
use sinan_transform::{
    DiseaseRegistry, LocationIndex, TranslationRegistry, build_cases, datetime, disease,
    preprocess,
};

use crate::cli::ImportArgs;
use crate::config::RegistrySettings;
use crate::json_writer;

/// Name of the location-tree root the importer operates under.
const COUNTRY_NAME: &str = "Brasil";

pub struct ImportResult {
    pub disease: String,
    pub outbreak_id: String,
    pub assembled: usize,
    pub outcomes: Vec<UploadOutcome>,
    pub dry_run: bool,
}

impl ImportResult {
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.is_success())
            .count()
    }
}

pub fn run_import(args: &ImportArgs) -> Result<ImportResult> {
    let span = info_span!("import", disease = %args.disease, outbreak = %args.outbreak);
    let _guard = span.enter();

    // Stage 1: configuration. Unknown diseases abort before any network or
    // file work.
    let mut translations = TranslationRegistry::with_builtins();
    let diseases = DiseaseRegistry::load(disease::builtin_descriptors(), &mut translations);
    let module = diseases.get(&args.disease)?;

    // Stage 2: ingest.
    let mut table = read_case_table(&args.cases)?;
    let dictionary = ResidenceDictionary::load(&args.dictionary)?;

    // Stage 3: preprocess.
    preprocess(&mut table, args.anonymize, Utc::now().date_naive());

    // Stage 4: registry resolution, all fatal on failure.
    let settings = RegistrySettings::from_env()?;
    let token = settings.access_token()?;
    let client = GodataClient::new(&settings.base_url, token)?;
    let outbreak_id = client
        .outbreak_id_by_name(&args.outbreak)
        .context("resolve outbreak")?;
    info!(%outbreak_id, "outbreak resolved");
    let forest = client
        .hierarchical_locations()
        .context("fetch location tree")?;
    let locations = LocationIndex::from_forest(forest, COUNTRY_NAME)
        .with_context(|| format!("location tree has no {COUNTRY_NAME:?} root"))?;

    // Stage 5: convert.
    let processed_at = datetime::now_timestamp();
    let cases = build_cases(
        &table,
        &dictionary,
        &locations,
        module,
        &translations,
        &outbreak_id,
        &processed_at,
    );

    // Stage 6: deliver.
    if let Some(path) = &args.dump_json {
        json_writer::write_cases(path, &cases)?;
    }

    let outcomes = if args.dry_run {
        info!("dry run, skipping upload");
        Vec::new()
    } else {
        CaseUploader::with_workers(&client, args.workers).send_cases(&cases, &outbreak_id)?
    };

    Ok(ImportResult {
        disease: args.disease.clone(),
        outbreak_id,
        assembled: cases.len(),
        outcomes,
        dry_run: args.dry_run,
    })
}

/// Lists the disease modules compiled into this build.
pub fn run_diseases() -> Result<()> {
    let mut translations = TranslationRegistry::with_builtins();
    let diseases = DiseaseRegistry::load(disease::builtin_descriptors(), &mut translations);
    for name in diseases.names() {
        println!("{name}");
    }
    Ok(())
}
