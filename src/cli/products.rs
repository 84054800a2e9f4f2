use std::io;

use clap::Args;
use loomcart::{
    catalog::{CatalogQuery, SortOrder, query::DEFAULT_PAGE_SIZE},
    config::StorefrontConfig,
    render,
};

#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Case-insensitive text matched against product names
    #[arg(long, short)]
    search: Option<String>,

    /// Category to show ("All" for every category)
    #[arg(long, short)]
    category: Option<String>,

    /// Sort order
    #[arg(long, value_enum, default_value_t = SortOrder::Newest)]
    sort: SortOrder,

    /// Page number, starting at 1
    #[arg(long, short, default_value_t = 1)]
    page: usize,

    /// Products per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// List the categories instead of products
    #[arg(long)]
    categories: bool,
}

pub(crate) fn run(config: &StorefrontConfig, args: ProductsArgs) -> Result<(), String> {
    let catalog = config
        .catalog()
        .map_err(|error| format!("failed to load catalog: {error}"))?;

    let mut out = io::stdout().lock();

    if args.categories {
        return write_categories(&mut out, catalog.categories())
            .map_err(|error| format!("failed to write categories: {error}"));
    }

    let mut query = CatalogQuery::with_page_size(args.page_size);

    if let Some(search) = args.search {
        query.set_search(search);
    }

    if let Some(category) = args.category {
        query.set_category(category);
    }

    query.set_sort(args.sort);
    query.set_page(args.page);

    render::write_catalog_page(&mut out, &query.apply(&catalog))
        .map_err(|error| format!("failed to write products: {error}"))
}

fn write_categories(out: &mut impl io::Write, categories: Vec<&str>) -> io::Result<()> {
    writeln!(out, "All")?;

    for category in categories {
        writeln!(out, "{category}")?;
    }

    Ok(())
}
