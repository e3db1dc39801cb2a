use std::{
    env, fmt,
    net::{AddrParseError, SocketAddr},
};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8545";

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub contract_address: String,
    pub ledger_gateway_url: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidListenAddr(AddrParseError),
    InvalidContractAddress,
    InvalidGatewayUrl,
    NonUnicodeListenAddr,
    NonUnicodeContractAddress,
    NonUnicodeGatewayUrl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidListenAddr(err) => {
                write!(f, "FRAME_SERVER_ADDR is not a valid socket address: {err}")
            }
            Self::InvalidContractAddress => {
                write!(
                    f,
                    "FRAME_LEADERBOARD_CONTRACT must be 0x followed by 40 hex digits"
                )
            }
            Self::InvalidGatewayUrl => {
                write!(f, "FRAME_LEDGER_GATEWAY must not be empty or whitespace")
            }
            Self::NonUnicodeListenAddr => {
                write!(f, "FRAME_SERVER_ADDR contains non-unicode data")
            }
            Self::NonUnicodeContractAddress => {
                write!(f, "FRAME_LEADERBOARD_CONTRACT contains non-unicode data")
            }
            Self::NonUnicodeGatewayUrl => {
                write!(f, "FRAME_LEDGER_GATEWAY contains non-unicode data")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidListenAddr(err) => Some(err),
            _ => None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = match env::var("FRAME_SERVER_ADDR") {
            Ok(value) => value.parse().map_err(ConfigError::InvalidListenAddr)?,
            Err(env::VarError::NotPresent) => DEFAULT_LISTEN_ADDR
                .parse()
                .expect("default listen address must be valid"),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicodeListenAddr);
            }
        };

        let contract_address = match env::var("FRAME_LEADERBOARD_CONTRACT") {
            Ok(value) => {
                if !is_hex_address(&value) {
                    return Err(ConfigError::InvalidContractAddress);
                }
                value.to_ascii_lowercase()
            }
            // Unset means no contract deployed: leaderboard stays disabled.
            Err(env::VarError::NotPresent) => ledger::ZERO_ADDRESS.to_owned(),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicodeContractAddress);
            }
        };

        let ledger_gateway_url = match env::var("FRAME_LEDGER_GATEWAY") {
            Ok(value) => {
                if value.trim().is_empty() {
                    return Err(ConfigError::InvalidGatewayUrl);
                }
                value
            }
            Err(env::VarError::NotPresent) => DEFAULT_GATEWAY_URL.to_owned(),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicodeGatewayUrl);
            }
        };

        Ok(Self {
            listen_addr,
            contract_address,
            ledger_gateway_url,
        })
    }
}

fn is_hex_address(value: &str) -> bool {
    let Some(digits) = value.strip_prefix("0x") else {
        return false;
    };
    digits.len() == 40 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use std::{env, sync::Mutex};

    use super::{Config, ConfigError};

    static ENV_LOCK: Mutex<()> = Mutex::new(());
    const ENV_ADDR_KEY: &str = "FRAME_SERVER_ADDR";
    const ENV_CONTRACT_KEY: &str = "FRAME_LEADERBOARD_CONTRACT";
    const ENV_GATEWAY_KEY: &str = "FRAME_LEDGER_GATEWAY";

    struct EnvVarGuard {
        key: &'static str,
        previous: Option<std::ffi::OsString>,
    }

    impl EnvVarGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let previous = env::var_os(key);
            env::set_var(key, value);
            Self { key, previous }
        }

        fn unset(key: &'static str) -> Self {
            let previous = env::var_os(key);
            env::remove_var(key);
            Self { key, previous }
        }

        #[cfg(unix)]
        fn set_os(key: &'static str, value: std::ffi::OsString) -> Self {
            let previous = env::var_os(key);
            env::set_var(key, value);
            Self { key, previous }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            match self.previous.take() {
                Some(value) => env::set_var(self.key, value),
                None => env::remove_var(self.key),
            }
        }
    }

    fn reset_config_env_baseline() -> [EnvVarGuard; 3] {
        [
            EnvVarGuard::unset(ENV_ADDR_KEY),
            EnvVarGuard::unset(ENV_CONTRACT_KEY),
            EnvVarGuard::unset(ENV_GATEWAY_KEY),
        ]
    }

    #[test]
    fn defaults_apply_when_env_is_unset() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.contract_address, ledger::ZERO_ADDRESS);
        assert_eq!(config.ledger_gateway_url, "http://127.0.0.1:8545");
    }

    #[test]
    fn uses_listen_address_override_from_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_ADDR_KEY, "127.0.0.1:9090");

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:9090".parse().unwrap());
    }

    #[test]
    fn returns_error_for_invalid_listen_address_override() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_ADDR_KEY, "not-an-addr");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidListenAddr(_)));
    }

    #[test]
    fn accepts_and_lowercases_a_contract_address() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(
            ENV_CONTRACT_KEY,
            "0x1234567890ABCDEF1234567890abcdef12345678",
        );

        let config = Config::from_env().unwrap();

        assert_eq!(
            config.contract_address,
            "0x1234567890abcdef1234567890abcdef12345678"
        );
    }

    #[test]
    fn rejects_malformed_contract_addresses() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();

        for bad in ["1234", "0x123", "0x1234567890abcdef1234567890abcdef1234567g"] {
            let _guard = EnvVarGuard::set(ENV_CONTRACT_KEY, bad);
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidContractAddress), "{bad}");
        }
    }

    #[test]
    fn rejects_blank_gateway_override() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_GATEWAY_KEY, "   ");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidGatewayUrl));
    }

    #[cfg(unix)]
    #[test]
    fn returns_error_for_non_unicode_contract_env_var() {
        use std::os::unix::ffi::OsStringExt;

        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set_os(
            ENV_CONTRACT_KEY,
            std::ffi::OsString::from_vec(vec![0x30, 0x78, 0x80]),
        );

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::NonUnicodeContractAddress));
    }
}
