use crate::error::ValidationError;

pub const DEFAULT_NETWORK: &str = "sandbox";

const NETWORK_VAR: &str = "HODL_NETWORK";
const APPROVAL_LEDGERS_VAR: &str = "HODL_APPROVAL_LEDGERS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Network the wallet must be on before anything is signed.
    pub network: String,
    /// Ledgers an approval stays live for. `None` keeps it live as long as
    /// the network allows.
    pub approval_ledgers: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            approval_ledgers: None,
        }
    }
}

impl ClientConfig {
    /// Reads `HODL_*` variables from the process environment, loading a
    /// `.env` file first if one exists.
    pub fn from_env() -> Result<Self, ValidationError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ValidationError> {
        let defaults = Self::default();

        let network = match lookup(NETWORK_VAR) {
            Some(value) if value.trim().is_empty() => {
                return Err(ValidationError::InvalidConfig {
                    key: NETWORK_VAR,
                    value,
                })
            }
            Some(value) => value.trim().to_string(),
            None => defaults.network,
        };

        let approval_ledgers = match lookup(APPROVAL_LEDGERS_VAR) {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(ledgers) if ledgers > 0 => Some(ledgers),
                _ => {
                    return Err(ValidationError::InvalidConfig {
                        key: APPROVAL_LEDGERS_VAR,
                        value,
                    })
                }
            },
            None => defaults.approval_ledgers,
        };

        Ok(Self {
            network,
            approval_ledgers,
        })
    }
}
