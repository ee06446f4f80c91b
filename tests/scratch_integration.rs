use scratch::dom::ElementExt;
use scratch::extract::collect_paths;
use scratch::tools::{ExportParams, ExportTool, ScratchParams, ScratchState, ScratchTool};
use scratch::{DomTree, KeyOptions, NameAliasTable, Scratcher, derive_selector, extract_all, normalize_keys};
use serde_json::{Value, json};

const CATALOG: &str = r#"
<html>
<head><title>Catalog</title></head>
<body>
  <ul id="products">
    <li class="product" data-sku="A1" style="color: red">
      <svg class="icon"><path d="M0 0h24v24H0z"></path><circle r="4"></circle></svg>
      <h2 class="title">Desk Lamp</h2>
      <span class="price" data-currency="EUR">12.50</span>
      <a class="link" href="/p/a1">Details</a>
    </li>
    <li class="product" data-sku="B2">
      <h2 class="title">Chair</h2>
      <span class="price" data-currency="USD">40</span>
      <a class="link" href="/p/b2">Details</a>
    </li>
    <li class="product" data-sku="C3">
      <h2 class="title">Shelf</h2>
      <span class="meta">{"stock": 3}</span>
    </li>
  </ul>
  <table>
    <tr><td>north</td><td>12</td></tr>
    <tr><td>south</td><td>7</td></tr>
  </table>
</body>
</html>
"#;

fn keys(value: &Value) -> Vec<String> {
    let mut found = Vec::new();
    collect_keys(value, &mut found);
    found
}

fn collect_keys(value: &Value, found: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                found.push(key.clone());
                collect_keys(value, found);
            }
        }
        Value::Array(values) => values.iter().for_each(|value| collect_keys(value, found)),
        _ => {}
    }
}

#[test]
fn test_derived_selector_matches_target() {
    let tree = DomTree::from_html(CATALOG);

    for target in ["li.product", "span.price", "td", "h2.title"] {
        let element = tree.find_target(target, 0).unwrap();
        let selector = derive_selector(element);
        let matches = tree.query(&selector).unwrap();

        assert!(
            matches.iter().any(|m| m.id() == element.id()),
            "'{}' does not match its own target",
            selector
        );
    }
}

#[test]
fn test_unclassed_cell_selector() {
    let tree = DomTree::from_html(CATALOG);
    let cell = tree.find_target("td", 3).unwrap();

    assert_eq!(cell.tag_name(), "td");
    assert_eq!(derive_selector(cell), "body table tbody tr td");
}

#[test]
fn test_one_result_per_match() {
    let tree = DomTree::from_html(CATALOG);

    assert_eq!(extract_all(&tree, "li.product").unwrap().len(), 3);
    assert_eq!(extract_all(&tree, "td").unwrap().len(), 4);
    assert!(extract_all(&tree, "section").unwrap().is_empty());
}

#[test]
fn test_presentation_and_graphics_are_dropped() {
    let tree = DomTree::from_html(CATALOG);
    let raw = Value::Array(extract_all(&tree, "li.product").unwrap());

    let found = keys(&raw);
    assert!(!found.iter().any(|k| k == "class" || k == "style"));
    assert!(!found.iter().any(|k| k.contains("svg") || k.contains("path") || k == "d" || k == "r"));

    let lamp = tree.find_target("li.product", 0).unwrap();
    assert!(collect_paths(lamp).paths().all(|path| !path.contains("svg")));
}

#[test]
fn test_scratch_catalog() {
    let tree = DomTree::from_html(CATALOG);
    let target = tree.find_target("li.product", 1).unwrap();

    let scratch = Scratcher::new().scratch(&tree, target);

    assert_eq!(scratch.selector, "li.product");
    assert_eq!(scratch.len(), 3);
    assert_eq!(
        scratch.items[0],
        json!({
            "product": "A1",
            "product_title": "Desk Lamp",
            "product_price": {"data_currency": "EUR", "_text": "12.50"},
            "product_link": {"href": "/p/a1", "_text": "Details"}
        })
    );
    assert_eq!(
        scratch.items[2],
        json!({
            "product": "C3",
            "product_title": "Shelf",
            "product_meta": {"stock": 3}
        })
    );
}

#[test]
fn test_normalization_is_deterministic() {
    let tree = DomTree::from_html(CATALOG);
    let raw = Value::Array(extract_all(&tree, "li.product").unwrap());

    let first = normalize_keys(raw.clone(), &mut NameAliasTable::new());
    let second = normalize_keys(raw, &mut NameAliasTable::new());
    assert_eq!(first, second);
    assert_eq!(
        keys(&first).iter().filter(|k| k.as_str() == "product_title").count(),
        3
    );
}

#[test]
fn test_scratch_then_export() {
    let tree = DomTree::from_html(CATALOG);
    let mut state = ScratchState::new();

    let scratched = ScratchTool::scratch_tree(
        &tree,
        &ScratchParams {
            target: Some("li.product".to_string()),
            ..Default::default()
        },
        &mut state,
    )
    .unwrap();

    let mut options: KeyOptions = serde_json::from_value(scratched["key_options"].clone()).unwrap();
    let offered: Vec<_> = options.options().iter().map(|o| o.key.clone()).collect();
    assert_eq!(
        offered,
        vec!["product", "product_title", "product_price", "product_link", "product_meta"]
    );

    options.rename("product", "sku");
    options.rename("product_title", "title");
    options.set_include("product_price", false);
    options.set_include("product_link", false);
    options.set_include("product_meta", false);

    let exported = ExportTool::export_payload(
        &ExportParams {
            id: scratched["id"].as_u64().unwrap(),
            options: options.options().to_vec(),
            out_dir: None,
        },
        &mut state,
    )
    .unwrap();

    assert_eq!(
        exported["json"],
        json!([
            {"sku": "A1", "title": "Desk Lamp"},
            {"sku": "B2", "title": "Chair"},
            {"sku": "C3", "title": "Shelf"}
        ])
    );
    assert!(state.payloads.is_empty());
}

#[test]
fn test_table_cells_scratch_to_strings() {
    let tree = DomTree::from_html(CATALOG);
    let cell = tree.find_target("td", 0).unwrap();

    let scratch = Scratcher::new().scratch(&tree, cell);
    assert_eq!(scratch.to_value(), json!(["north", "12", "south", "7"]));
    assert!(KeyOptions::from_payload(&scratch.items).is_none());
}
