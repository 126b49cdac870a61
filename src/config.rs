use crate::error::ConfigError;
use std::str::FromStr;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 数据目录（indicators.toml + students/*.toml）
    pub data_dir: String,
    /// 成绩单输出目录
    pub output_dir: String,
    /// 排版策略覆盖文件（可选）
    pub layout_overrides_file: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 当前可编辑的学期（1..=3）
    pub current_period: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            output_dir: "output_bulletins".to_string(),
            layout_overrides_file: None,
            verbose_logging: false,
            output_log_file: "bulletins.log".to_string(),
            current_period: 1,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，未设置的项使用默认值
    ///
    /// 设置了但无法解析的值返回错误；`CURRENT_PERIOD` 超出范围时截断到 1..=3
    pub fn from_env() -> Result<Self, ConfigError> {
        let default = Self::default();
        Ok(Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or(default.data_dir),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            layout_overrides_file: std::env::var("LAYOUT_OVERRIDES_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .or(default.layout_overrides_file),
            verbose_logging: parse_var::<bool>("VERBOSE_LOGGING", "bool")?
                .unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            current_period: parse_var::<u8>("CURRENT_PERIOD", "u8")?
                .map(|p| p.clamp(1, 3))
                .unwrap_or(default.current_period),
        })
    }
}

fn parse_var<T: FromStr>(var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
