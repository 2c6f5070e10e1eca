use anyhow::Result;
use demo_catalog::cli::import::{self, ImportArgs};
use demo_catalog::util::{env, logging};

fn main() -> Result<()> {
    env::init_env();
    logging::init_tracing("info")?;
    env::bootstrap_cli("import_demos");
    import::run(ImportArgs::default())?;
    Ok(())
}
