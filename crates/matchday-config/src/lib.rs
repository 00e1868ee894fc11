use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use matchday_core::messaging::{LinkOptions, MessageTemplates, PLACEHOLDERS};
use matchday_core::{PhonePolicy, PipelineOptions, SortOrder};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "matchday";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_TOKEN_ENV: &str = "MATCHDAY_DRIVE_TOKEN";
pub const MIN_LOCAL_PHONE_DIGITS: usize = 6;
pub const MAX_LOCAL_PHONE_DIGITS: usize = 15;
const MAX_COUNTRY_PREFIX_DIGITS: usize = 4;

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub strict_phone: bool,
    pub sort: SortOrder,
    pub messages: MessagesConfig,
    pub drive: DriveConfig,
}

#[derive(Debug, Clone, Default)]
pub struct MessagesConfig {
    pub templates: MessageTemplates,
    pub links: LinkOptions,
}

#[derive(Debug, Clone)]
pub struct DriveConfig {
    /// Environment variable holding the Drive bearer token.
    pub token_env: String,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            token_env: DEFAULT_TOKEN_ENV.to_string(),
        }
    }
}

impl AppConfig {
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            phone_policy: if self.strict_phone {
                PhonePolicy::Strict
            } else {
                PhonePolicy::Lenient
            },
            sort: self.sort,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid {name} message template: {reason}")]
    InvalidTemplate { name: &'static str, reason: String },
    #[error("invalid country_prefix value: {0}")]
    InvalidCountryPrefix(String),
    #[error("invalid local_phone_digits value: {0}")]
    InvalidLocalPhoneDigits(usize),
    #[error("invalid drive token_env value: {0}")]
    InvalidTokenEnv(String),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    strict_phone: Option<bool>,
    sort: Option<SortOrder>,
    messages: Option<MessagesFile>,
    drive: Option<DriveFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MessagesFile {
    confirmation: Option<String>,
    reminder: Option<String>,
    country_prefix: Option<String>,
    local_phone_digits: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DriveFile {
    token_env: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(strict) = parsed.strict_phone {
        config.strict_phone = strict;
    }
    if let Some(sort) = parsed.sort {
        config.sort = sort;
    }

    if let Some(messages) = parsed.messages {
        if let Some(template) = messages.confirmation {
            validate_template("confirmation", &template)?;
            config.messages.templates.confirmation = template;
        }
        if let Some(template) = messages.reminder {
            validate_template("reminder", &template)?;
            config.messages.templates.reminder = template;
        }
        if let Some(prefix) = messages.country_prefix {
            config.messages.links.country_prefix = Some(validate_country_prefix(&prefix)?);
        }
        if let Some(digits) = messages.local_phone_digits {
            if !(MIN_LOCAL_PHONE_DIGITS..=MAX_LOCAL_PHONE_DIGITS).contains(&digits) {
                return Err(ConfigError::InvalidLocalPhoneDigits(digits));
            }
            config.messages.links.local_phone_digits = digits;
        }
    }

    if let Some(drive) = parsed.drive {
        if let Some(token_env) = drive.token_env {
            if !is_env_var_name(&token_env) {
                return Err(ConfigError::InvalidTokenEnv(token_env));
            }
            config.drive.token_env = token_env;
        }
    }

    Ok(config)
}

fn validate_template(name: &'static str, template: &str) -> Result<()> {
    if template.trim().is_empty() {
        return Err(ConfigError::InvalidTemplate {
            name,
            reason: "template is empty".to_string(),
        });
    }
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start..];
        let end = after.find('}').ok_or_else(|| ConfigError::InvalidTemplate {
            name,
            reason: "unclosed placeholder".to_string(),
        })?;
        let placeholder = &after[..=end];
        if !PLACEHOLDERS.contains(&placeholder) {
            return Err(ConfigError::InvalidTemplate {
                name,
                reason: format!("unknown placeholder {placeholder}"),
            });
        }
        rest = &after[end + 1..];
    }
    Ok(())
}

fn validate_country_prefix(raw: &str) -> Result<String> {
    let digits = raw.trim().trim_start_matches('+');
    if digits.is_empty()
        || digits.len() > MAX_COUNTRY_PREFIX_DIGITS
        || !digits.chars().all(|ch| ch.is_ascii_digit())
    {
        return Err(ConfigError::InvalidCountryPrefix(raw.to_string()));
    }
    Ok(digits.to_string())
}

fn is_env_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load_at_path, merge_config, ConfigError, ConfigFile, DriveFile, MessagesFile};
    use matchday_core::{PhonePolicy, SortOrder};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            strict_phone: Some(true),
            sort: Some(SortOrder::Chronological),
            messages: Some(MessagesFile {
                confirmation: Some("Hola {team}, juegas el {day}".to_string()),
                reminder: None,
                country_prefix: Some("+57".to_string()),
                local_phone_digits: Some(10),
            }),
            drive: Some(DriveFile {
                token_env: Some("DRIVE_TOKEN".to_string()),
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        let options = merged.pipeline_options();
        assert_eq!(options.phone_policy, PhonePolicy::Strict);
        assert_eq!(options.sort, SortOrder::Chronological);
        assert_eq!(
            merged.messages.templates.confirmation,
            "Hola {team}, juegas el {day}"
        );
        assert!(merged.messages.templates.reminder.starts_with("Recordatorio"));
        assert_eq!(merged.messages.links.country_prefix.as_deref(), Some("57"));
        assert_eq!(merged.drive.token_env, "DRIVE_TOKEN");
    }

    #[test]
    fn defaults_are_lenient_and_lexical() {
        let merged = merge_config(ConfigFile::default()).expect("merge");
        let options = merged.pipeline_options();
        assert_eq!(options.phone_policy, PhonePolicy::Lenient);
        assert_eq!(options.sort, SortOrder::Lexical);
        assert!(merged.messages.links.country_prefix.is_none());
    }

    #[test]
    fn unknown_placeholder_is_rejected() {
        let parsed = ConfigFile {
            messages: Some(MessagesFile {
                reminder: Some("Partido {dia}".to_string()),
                ..MessagesFile::default()
            }),
            ..ConfigFile::default()
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTemplate { name: "reminder", .. }));
    }

    #[test]
    fn bad_prefix_and_digits_are_rejected() {
        let parsed = ConfigFile {
            messages: Some(MessagesFile {
                country_prefix: Some("57a".to_string()),
                ..MessagesFile::default()
            }),
            ..ConfigFile::default()
        };
        assert!(matches!(
            merge_config(parsed),
            Err(ConfigError::InvalidCountryPrefix(_))
        ));

        let parsed = ConfigFile {
            messages: Some(MessagesFile {
                local_phone_digits: Some(2),
                ..MessagesFile::default()
            }),
            ..ConfigFile::default()
        };
        assert!(matches!(
            merge_config(parsed),
            Err(ConfigError::InvalidLocalPhoneDigits(2))
        ));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("config file not found"));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "strict_phone = true\nsort = \"chronological\"\n[messages]\ncountry_prefix = \"57\"\n[drive]\ntoken_env = \"GDRIVE\"\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert!(config.strict_phone);
        assert_eq!(config.sort, SortOrder::Chronological);
        assert_eq!(config.drive.token_env, "GDRIVE");
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "strict_phones = true\n").expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_shared_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "strict_phone = false\n").expect("write config");
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&path, perms).expect("chmod");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }
}
