//! Browse pipeline over the demo catalog and a YAML catalog on disk.

use std::io::Write;

use testresult::TestResult;

use loomcart::{
    catalog::{Catalog, CatalogQuery, CategoryFilter, SortOrder},
    fixtures::FixtureError,
};

fn names(query: &CatalogQuery, catalog: &Catalog) -> Vec<String> {
    query
        .apply(catalog)
        .products
        .iter()
        .map(|product| product.name.clone())
        .collect()
}

#[test]
fn category_and_text_filters_combine() -> TestResult {
    let catalog = Catalog::demo()?;
    let mut query = CatalogQuery::new();

    query.set_category("Jewelry");
    query.set_search("traditional");

    assert_eq!(names(&query, &catalog), ["Traditional Jewelry Set"]);

    query.set_category(CategoryFilter::ALL);

    assert_eq!(
        names(&query, &catalog),
        [
            "Traditional Jewelry Set",
            "Aronai Traditional Scarf",
            "Traditional Bodo Shawl"
        ]
    );

    Ok(())
}

#[test]
fn search_ignores_case() -> TestResult {
    let catalog = Catalog::demo()?;
    let mut query = CatalogQuery::new();

    query.set_search("BAMBOO");

    assert_eq!(names(&query, &catalog), ["Bamboo Craft Basket"]);

    Ok(())
}

#[test]
fn price_ascending_orders_sample() -> TestResult {
    let catalog = Catalog::demo()?;
    let mut query = CatalogQuery::new();

    query.set_sort(SortOrder::PriceAscending);

    let prices: Vec<i64> = query
        .apply(&catalog)
        .products
        .iter()
        .map(|product| product.price.to_minor_units() / 100)
        .collect();

    assert_eq!(prices, [899, 1299, 2499, 3999]);

    Ok(())
}

#[test]
fn changing_search_on_page_two_returns_to_page_one() -> TestResult {
    let catalog = Catalog::demo()?;
    let mut query = CatalogQuery::with_page_size(2);

    query.set_page(2);
    assert_eq!(query.apply(&catalog).page, 2);

    query.set_search("a");
    assert_eq!(query.page(), 1);

    query.set_page(2);
    query.set_sort(SortOrder::RatingDescending);
    assert_eq!(query.page(), 2);

    Ok(())
}

#[test]
fn yaml_catalog_loads_from_disk() -> TestResult {
    let mut file = tempfile::NamedTempFile::new()?;

    writeln!(
        file,
        r#"products:
  - id: "10"
    name: Water Hyacinth Mat
    description: Woven floor mat
    price: "650 INR"
    seller_id: artisan7
    seller_name: Hira Devi
    rating: "4.2"
    category: Home Decor
"#
    )?;

    let catalog = Catalog::from_path(file.path())?;

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.categories(), ["Home Decor"]);

    Ok(())
}

#[test]
fn missing_catalog_file_is_an_io_error() {
    let result = Catalog::from_path("/definitely/not/here.yml");

    assert!(matches!(result, Err(FixtureError::Io(_))));
}
