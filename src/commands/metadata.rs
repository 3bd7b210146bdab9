use wikirender::config::Config;
use wikirender::page::{InMemoryCategories, Page, enrich, slugify, tags_to_list};

use crate::{PageArgs, SlugArgs, TagsArgs};

pub fn slug(args: &SlugArgs) {
    println!("{}", slugify(&args.title));
}

pub fn tags(args: &TagsArgs) {
    for tag in tags_to_list(&args.raw) {
        println!("{tag}");
    }
}

pub async fn page(args: &PageArgs) -> Result<(), anyhow::Error> {
    let config = Config::load_from_arg(args.config_file.as_deref())?;

    let content = tokio::fs::read_to_string(&args.page).await.map_err(|e| {
        anyhow::anyhow!("failed to read {path}: {e}", path = args.page.display())
    })?;
    let page: Page = serde_json::from_str(&content)?;

    let categories = match args.categories.as_ref().or(config.server.categories_path.as_ref()) {
        Some(path) => InMemoryCategories::load(path)?,
        None => InMemoryCategories::default(),
    };

    println!("{}", serde_json::to_string_pretty(&enrich(&page, &categories))?);

    Ok(())
}
