//! 产品详情接口的响应结构
//!
//! 所有字段都是可选的：缺失或为 `null` 的字段在映射时一律取空字符串，
//! 不会导致整行失败。

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProductDetailsResponse {
    pub product: Option<Product>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Product {
    pub manufacturer_product_number: Option<String>,
    pub manufacturer: Option<Manufacturer>,
    pub description: Option<ProductDescription>,
    pub datasheet_url: Option<String>,
    pub photo_url: Option<String>,
    pub product_variations: Option<Vec<ProductVariation>>,
    pub category: Option<Category>,
    pub parameters: Option<Vec<Parameter>>,
    /// 保留响应中的键顺序
    pub classifications: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Manufacturer {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProductDescription {
    pub product_description: Option<String>,
    pub detailed_description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProductVariation {
    pub standard_pricing: Option<Vec<PriceBreak>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PriceBreak {
    pub unit_price: Option<Value>,
}

/// 分类树节点
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Category {
    pub name: Option<String>,
    pub parent_id: Option<i64>,
    pub child_categories: Option<Vec<Category>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Parameter {
    pub parameter_text: Option<Value>,
    pub value_text: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nulls_and_missing_fields_deserialize() {
        let response: ProductDetailsResponse = serde_json::from_value(json!({
            "Product": {
                "ManufacturerProductNumber": "LM317T",
                "Manufacturer": null,
                "Parameters": null
            }
        }))
        .unwrap();

        let product = response.product.unwrap();
        assert_eq!(product.manufacturer_product_number.as_deref(), Some("LM317T"));
        assert!(product.manufacturer.is_none());
        assert!(product.parameters.is_none());
        assert!(product.category.is_none());
    }

    #[test]
    fn classification_key_order_is_preserved() {
        let response: ProductDetailsResponse = serde_json::from_value(json!({
            "Product": {
                "Classifications": { "RohsStatus": "ROHS3", "MoistureSensitivityLevel": "1", "ExportControlClassNumber": "EAR99" }
            }
        }))
        .unwrap();

        let keys: Vec<_> = response
            .product
            .unwrap()
            .classifications
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["RohsStatus", "MoistureSensitivityLevel", "ExportControlClassNumber"]);
    }
}
