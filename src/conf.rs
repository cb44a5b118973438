use config::Config;
use serde::{Deserialize, Serialize};
///  fn settings() -> &'static RwLock<Config>
///  fn setup() -> &'static RwLock<Setup>
///
///  struct Setup
use std::sync::{OnceLock, RwLock};

/// get settings
/// it's not recommand to call settings() directly
/// use setup() to get the typed Setup instance
///
/// # Returns
/// * `&'static RwLock<Config>` - config instance
pub fn settings() -> &'static RwLock<Config> {
    static CONFIG: OnceLock<RwLock<Config>> = OnceLock::new();
    CONFIG.get_or_init(|| RwLock::new(init_config()))
}

/// get setup instance
/// # Returns
/// * `&'static RwLock<Setup>` - setup instance
pub fn setup() -> &'static RwLock<Setup> {
    static SETUP: OnceLock<RwLock<Setup>> = OnceLock::new();
    SETUP.get_or_init(|| {
        RwLock::new(match settings().read().unwrap().clone().try_deserialize::<Setup>() {
            Ok(setup) => setup,
            Err(e) => {
                tracing::warn!("setup config not loaded, using defaults: {}", e);
                Setup::defaults()
            },
        })
    })
}

/// init config
/// # Returns
/// * `Config` - config instance
fn init_config() -> Config {
    //development production testing
    let run_mode = std::env::var("SIFT_RUN_MODE").unwrap_or("development".to_string());

    let config_path = std::env::var("SIFT_CONFIG_PATH").unwrap_or("config".to_string());

    let conf = config::File::with_name(&format!("{config_path}/config.yml")).required(false);
    let mode = config::File::with_name(&format!("{config_path}/{run_mode}.yml")).required(false);
    let local = config::File::with_name(&format!("{config_path}/local.yml")).required(false);

    let mut builder = Config::builder().add_source(conf).add_source(mode).add_source(local);
    builder = builder.add_source(config::Environment::with_prefix("SIFT"));

    builder.build().unwrap()
}

/// Setup config
/// # Fields
/// * `name` - app name
/// * `short` - app short name, used as the first segment of layouted codes
/// * `debug` - debug mode
/// * `query` - list-query defaults
/// * `log` - log config
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Setup {
    pub name: String,
    pub short: String,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub query: QueryConf,
    pub log: Option<LogConf>,
}

impl Setup {
    pub fn defaults() -> Setup {
        Setup { name: "Sift".to_string(), short: "SIFT".to_string(), debug: true, query: Default::default(), log: None }
    }
}

/// 列表查询缺省值
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QueryConf {
    pub default_take: i64,
    pub max_take: i64,
    pub default_order_by: String,
    pub default_dir: String,
    pub restrict_order_by: bool,
}

impl Default for QueryConf {
    fn default() -> Self {
        QueryConf {
            default_take: 10,
            max_take: 1000,
            default_order_by: "ID".to_string(),
            default_dir: "DESC".to_string(),
            restrict_order_by: false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogConf {
    pub console: bool,
    pub dirs: String,
    pub level: String,
}

impl Default for LogConf {
    fn default() -> Self {
        LogConf { console: true, dirs: String::new(), level: "info".to_string() }
    }
}
