use crate::error::FetchError;
use chrono::{DateTime, SecondsFormat, Utc};

/// 输出表格的表头，顺序与 [`OutputRow::fields`] 一致
pub const OUTPUT_HEADERS: [&str; 10] = [
    "ManufacturerProductNumber",
    "ExtraManufacturerName",
    "ExtraDescription",
    "ExtraDetailedDescription",
    "ExtraDatasheetUrl",
    "UnitPrice",
    "PhotoUrl",
    "Category",
    "ProductAttributes",
    "AdditionalInformation",
];

/// 一个编号查询成功后写入的一行
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRow {
    pub manufacturer_part_number: String,
    pub manufacturer_name: String,
    pub description: String,
    pub detailed_description: String,
    pub datasheet_url: String,
    pub unit_price: String,
    pub photo_url: String,
    pub category_path: String,
    /// `<tr><th>..</th><td>..</td></tr>` 形式的参数表
    pub parameters_markup: String,
    /// `<tr><th>..</th><td>..</td></tr>` 形式的分类表
    pub classifications_markup: String,
}

impl OutputRow {
    pub fn fields(&self) -> [&str; 10] {
        [
            &self.manufacturer_part_number,
            &self.manufacturer_name,
            &self.description,
            &self.detailed_description,
            &self.datasheet_url,
            &self.unit_price,
            &self.photo_url,
            &self.category_path,
            &self.parameters_markup,
            &self.classifications_markup,
        ]
    }
}

/// 失败日志中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub timestamp: DateTime<Utc>,
    pub identifier: String,
    /// HTTP 状态码或 `ERR`
    pub status: String,
    pub message: String,
}

impl FailureRecord {
    pub fn from_error(err: &FetchError, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            identifier: err.identifier.clone(),
            status: err.status_label(),
            message: err.message.clone(),
        }
    }

    /// `[时间戳] 编号 | 状态 | 消息`，不含换行
    pub fn to_line(&self) -> String {
        format!(
            "[{}] {} | {} | {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.identifier,
            self.status,
            self.message.replace(['\r', '\n'], " ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn failure_line_format() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let record = FailureRecord::from_error(&FetchError::new("ABC-1", Some(404), "Not Found"), ts);
        assert_eq!(record.to_line(), "[2024-03-01T08:30:00.000Z] ABC-1 | 404 | Not Found");
    }

    #[test]
    fn failure_line_without_status_uses_err() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let record = FailureRecord::from_error(&FetchError::new("X", None, "timed\nout"), ts);
        assert_eq!(record.to_line(), "[2024-03-01T08:30:00.000Z] X | ERR | timed out");
    }

    #[test]
    fn fields_follow_header_order() {
        let row = OutputRow {
            manufacturer_part_number: "MPN".into(),
            classifications_markup: "CLS".into(),
            ..Default::default()
        };
        let fields = row.fields();
        assert_eq!(fields.len(), OUTPUT_HEADERS.len());
        assert_eq!(fields[0], "MPN");
        assert_eq!(fields[9], "CLS");
    }
}
