use serde::Deserialize;
use std::fmt;

/// 一组 API 凭据（client_id / client_secret）
///
/// 在凭据列表中的位置即其身份，加载后不再修改
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialPair {
    #[serde(rename = "client_id")]
    pub id: String,
    #[serde(rename = "client_secret")]
    pub secret: String,
}

impl CredentialPair {
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("id", &self.id)
            .field("secret", &"***")
            .finish()
    }
}

/// `keys.json` 的文件结构
#[derive(Debug, Default, Deserialize)]
pub struct CredentialFile {
    #[serde(default)]
    pub keys: Vec<CredentialPair>,
}

/// 按轮询方式为第 `position` 个批次选取凭据
///
/// `position` 是批次在过滤后列表中的位置（从 0 开始），不是批次编号。
/// 调用方保证 `credentials` 非空。
pub fn assign_credential(credentials: &[CredentialPair], position: usize) -> &CredentialPair {
    &credentials[position % credentials.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: usize) -> Vec<CredentialPair> {
        (0..n)
            .map(|i| CredentialPair::new(format!("id-{i}"), format!("secret-{i}")))
            .collect()
    }

    #[test]
    fn single_credential_is_always_chosen() {
        let creds = pool(1);
        for position in 0..5 {
            assert_eq!(assign_credential(&creds, position).id, "id-0");
        }
    }

    #[test]
    fn rotation_wraps_around() {
        let creds = pool(2);
        let ids: Vec<_> = (0..3).map(|p| assign_credential(&creds, p).id.as_str()).collect();
        assert_eq!(ids, vec!["id-0", "id-1", "id-0"]);
    }

    #[test]
    fn more_credentials_than_batches() {
        let creds = pool(5);
        assert_eq!(assign_credential(&creds, 0).id, "id-0");
        assert_eq!(assign_credential(&creds, 1).id, "id-1");
    }

    #[test]
    fn debug_output_hides_secret() {
        let cred = CredentialPair::new("abc", "top-secret");
        let debug = format!("{:?}", cred);
        assert!(debug.contains("abc"));
        assert!(!debug.contains("top-secret"));
    }
}
