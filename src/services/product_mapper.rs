//! 产品详情 → 输出行映射 - 业务能力层
//!
//! 只负责把一次响应变成一行，不关心请求和写入

use crate::models::product::{Category, Parameter, Product, ProductDetailsResponse};
use crate::models::OutputRow;
use serde_json::{Map, Number, Value};

/// 分类路径的分隔符
pub const CATEGORY_SEPARATOR: &str = " > ";

/// 将响应映射为固定 10 列的输出行，缺失字段取空字符串
pub fn map_product(response: &ProductDetailsResponse) -> OutputRow {
    let empty = Product::default();
    let product = response.product.as_ref().unwrap_or(&empty);

    OutputRow {
        manufacturer_part_number: text(&product.manufacturer_product_number),
        manufacturer_name: product
            .manufacturer
            .as_ref()
            .map(|m| text(&m.name))
            .unwrap_or_default(),
        description: product
            .description
            .as_ref()
            .map(|d| text(&d.product_description))
            .unwrap_or_default(),
        detailed_description: product
            .description
            .as_ref()
            .map(|d| text(&d.detailed_description))
            .unwrap_or_default(),
        datasheet_url: text(&product.datasheet_url),
        unit_price: unit_price(product),
        photo_url: text(&product.photo_url),
        category_path: product
            .category
            .as_ref()
            .map(category_path)
            .unwrap_or_default(),
        parameters_markup: parameters_markup(product.parameters.as_deref().unwrap_or_default()),
        classifications_markup: product
            .classifications
            .as_ref()
            .map(classifications_markup)
            .unwrap_or_default(),
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// JSON 值转为单元格文本：字符串原样输出，`null` 为空
fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number_text(n),
        Some(other) => other.to_string(),
    }
}

/// 数字按 ECMAScript `Number#toString` 的规则输出
///
/// 1e-6 <= |x| < 1e21 用普通小数（`0.00001`、`123`），其余用指数（`1e-7`、`1e+21`）
fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    let Some(x) = n.as_f64() else {
        return n.to_string();
    };
    if x == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&x.abs()) {
        return x.to_string();
    }
    let exp = format!("{:e}", x);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

/// 第一个规格的第一档单价；为 0 或缺失时为空
fn unit_price(product: &Product) -> String {
    let price = product
        .product_variations
        .as_ref()
        .and_then(|v| v.first())
        .and_then(|v| v.standard_pricing.as_ref())
        .and_then(|p| p.first())
        .and_then(|p| p.unit_price.as_ref());

    match price {
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
        Some(Value::String(s)) if s.is_empty() => String::new(),
        Some(Value::Bool(false)) => String::new(),
        other => value_text(other),
    }
}

/// 深度优先展开分类树，得到 (名称, ParentId) 列表
pub fn flatten_categories(root: &Category) -> Vec<(String, i64)> {
    let mut out = Vec::new();
    collect_categories(root, &mut out);
    out
}

fn collect_categories(node: &Category, out: &mut Vec<(String, i64)>) {
    out.push((text(&node.name), node.parent_id.unwrap_or(0)));
    for child in node.child_categories.iter().flatten() {
        collect_categories(child, out);
    }
}

/// 分类路径：按 ParentId 升序稳定排序后用 `" > "` 连接，丢弃空名称
pub fn category_path(root: &Category) -> String {
    let mut flat = flatten_categories(root);
    flat.sort_by_key(|(_, parent_id)| *parent_id);
    flat.into_iter()
        .map(|(name, _)| name)
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(CATEGORY_SEPARATOR)
}

fn table_row(header: &str, cell: &str) -> String {
    format!("<tr><th>{}</th><td>{}</td></tr>", header, cell)
}

/// 参数表，每个参数一行
pub fn parameters_markup(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|p| {
            table_row(
                &value_text(p.parameter_text.as_ref()),
                &value_text(p.value_text.as_ref()),
            )
        })
        .collect()
}

/// 分类信息表，按响应中的键顺序每项一行
pub fn classifications_markup(classifications: &Map<String, Value>) -> String {
    classifications
        .iter()
        .map(|(key, value)| table_row(key, &value_text(Some(value))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> ProductDetailsResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn category_tree_sorted_by_parent_id() {
        let root: Category = serde_json::from_value(json!({
            "Name": "A",
            "ParentId": 5,
            "ChildCategories": [{ "Name": "B", "ParentId": 2 }]
        }))
        .unwrap();

        assert_eq!(category_path(&root), "B > A");
    }

    #[test]
    fn category_sort_is_stable_and_drops_empty_names() {
        let root: Category = serde_json::from_value(json!({
            "Name": "Root",
            "ParentId": 0,
            "ChildCategories": [
                { "Name": "", "ParentId": 1 },
                { "Name": "Left", "ParentId": 7, "ChildCategories": [{ "Name": "Deep", "ParentId": 9 }] },
                { "Name": "Right", "ParentId": 7 }
            ]
        }))
        .unwrap();

        assert_eq!(flatten_categories(&root).len(), 5);
        assert_eq!(category_path(&root), "Root > Left > Right > Deep");
    }

    #[test]
    fn full_response_maps_every_column() {
        let row = map_product(&response(json!({
            "Product": {
                "ManufacturerProductNumber": "LM317T",
                "Manufacturer": { "Name": "Texas Instruments" },
                "Description": {
                    "ProductDescription": "IC REG LIN POS ADJ 1.5A TO220-3",
                    "DetailedDescription": "Linear Voltage Regulator IC"
                },
                "DatasheetUrl": "https://example.com/lm317.pdf",
                "PhotoUrl": "https://example.com/lm317.jpg",
                "ProductVariations": [{ "StandardPricing": [{ "UnitPrice": 0.87 }, { "UnitPrice": 0.5 }] }],
                "Category": { "Name": "Integrated Circuits (ICs)", "ParentId": 0,
                              "ChildCategories": [{ "Name": "PMIC", "ParentId": 32 }] },
                "Parameters": [
                    { "ParameterText": "Output Type", "ValueText": "Adjustable" },
                    { "ParameterText": "Number of Regulators", "ValueText": "1" }
                ],
                "Classifications": { "RohsStatus": "ROHS3 Compliant", "MoistureSensitivityLevel": "1 (Unlimited)" }
            }
        })));

        assert_eq!(row.manufacturer_part_number, "LM317T");
        assert_eq!(row.manufacturer_name, "Texas Instruments");
        assert_eq!(row.description, "IC REG LIN POS ADJ 1.5A TO220-3");
        assert_eq!(row.detailed_description, "Linear Voltage Regulator IC");
        assert_eq!(row.datasheet_url, "https://example.com/lm317.pdf");
        assert_eq!(row.unit_price, "0.87");
        assert_eq!(row.photo_url, "https://example.com/lm317.jpg");
        assert_eq!(row.category_path, "Integrated Circuits (ICs) > PMIC");
        assert_eq!(
            row.parameters_markup,
            "<tr><th>Output Type</th><td>Adjustable</td></tr><tr><th>Number of Regulators</th><td>1</td></tr>"
        );
        assert_eq!(
            row.classifications_markup,
            "<tr><th>RohsStatus</th><td>ROHS3 Compliant</td></tr><tr><th>MoistureSensitivityLevel</th><td>1 (Unlimited)</td></tr>"
        );
    }

    #[test]
    fn missing_product_yields_empty_row() {
        let row = map_product(&response(json!({})));
        assert_eq!(row, OutputRow::default());
    }

    #[test]
    fn missing_nested_fields_become_empty_strings() {
        let row = map_product(&response(json!({
            "Product": {
                "Manufacturer": {},
                "ProductVariations": [],
                "Parameters": [{ "ParameterText": "Voltage" }]
            }
        })));

        assert_eq!(row.manufacturer_name, "");
        assert_eq!(row.unit_price, "");
        assert_eq!(row.parameters_markup, "<tr><th>Voltage</th><td></td></tr>");
    }

    #[test]
    fn zero_price_renders_empty() {
        let row = map_product(&response(json!({
            "Product": { "ProductVariations": [{ "StandardPricing": [{ "UnitPrice": 0 }] }] }
        })));
        assert_eq!(row.unit_price, "");
    }

    #[test]
    fn non_string_classification_values_render_as_text() {
        let row = map_product(&response(json!({
            "Product": { "Classifications": { "ReachStatus": null, "Level": 3 } }
        })));
        assert_eq!(
            row.classifications_markup,
            "<tr><th>ReachStatus</th><td></td></tr><tr><th>Level</th><td>3</td></tr>"
        );
    }

    #[test]
    fn prices_render_like_javascript_numbers() {
        let price = |v: Value| {
            map_product(&response(json!({
                "Product": { "ProductVariations": [{ "StandardPricing": [{ "UnitPrice": v }] }] }
            })))
            .unit_price
        };

        assert_eq!(price(json!(0.00001)), "0.00001");
        assert_eq!(price(json!(0.87)), "0.87");
        assert_eq!(price(json!(12.0)), "12");
        assert_eq!(price(json!(1e-7)), "1e-7");
        assert_eq!(price(json!(1e21)), "1e+21");
        assert_eq!(price(json!(2.5e-8)), "2.5e-8");
    }
}
