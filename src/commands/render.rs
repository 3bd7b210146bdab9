use tokio::io::AsyncReadExt;
use wikirender::config::Config;
use wikirender::text::Pipeline;

use crate::RenderArgs;

pub async fn run(args: &RenderArgs) -> Result<(), anyhow::Error> {
    let config = Config::load_from_arg(args.config_file.as_deref())?;
    let pipeline = Pipeline::from_config(&config.text, &config.markdown)?;

    let markdown = match &args.input {
        Some(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
            anyhow::anyhow!("failed to read {path}: {e}", path = path.display())
        })?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    print!("{}", pipeline.render(&markdown));

    Ok(())
}
