use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Верхняя граница для фиксированных задержек стратегий
const MAX_DELAY_MS: u64 = 5000;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub focus: FocusConfig,
    pub directory: DirectoryConfig,
    pub trigger: TriggerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub filter: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FocusConfig {
    /// Пауза после SW_RESTORE, чтобы ОС завершила анимацию
    pub restore_settle_delay_ms: u64,
    /// Пауза до и после синтетического нажатия модификатора
    pub workaround_key_delay_ms: u64,
    pub modifier_key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DirectoryConfig {
    pub max_entries: usize,
    pub title_max_chars: usize,
    pub default_selection: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TriggerConfig {
    pub source: String,
    pub rising_edge_only: bool,
    pub stop_on_success: bool,
    pub retry_cooldown_ms: u64,
    pub emulated_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
                filter: "presence_switch=info".to_string(),
            },
            focus: FocusConfig {
                restore_settle_delay_ms: 100,
                workaround_key_delay_ms: 50,
                modifier_key: "alt".to_string(),
            },
            directory: DirectoryConfig {
                max_entries: 10,
                title_max_chars: 70,
                default_selection: 1,
            },
            trigger: TriggerConfig {
                source: "stdin".to_string(),
                rising_edge_only: false,
                stop_on_success: true,
                retry_cooldown_ms: 1000,
                emulated_interval_ms: 500,
            },
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        // Файл необязателен: отсутствующие ключи берутся из значений по умолчанию
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("PSWITCH_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        // Валидация задержек стратегий
        if self.focus.restore_settle_delay_ms > MAX_DELAY_MS {
            anyhow::bail!("restore_settle_delay_ms должно быть не больше {}", MAX_DELAY_MS);
        }
        if self.focus.workaround_key_delay_ms > MAX_DELAY_MS {
            anyhow::bail!("workaround_key_delay_ms должно быть не больше {}", MAX_DELAY_MS);
        }

        match self.focus.modifier_key.as_str() {
            "alt" | "ctrl" | "shift" => {}
            _ => anyhow::bail!("Неверная клавиша-модификатор: {}", self.focus.modifier_key),
        }

        // Валидация списка окон
        if self.directory.max_entries == 0 || self.directory.max_entries > 50 {
            anyhow::bail!("max_entries должно быть в диапазоне 1..=50");
        }

        if self.directory.title_max_chars < 10 {
            anyhow::bail!("title_max_chars должно быть минимум 10");
        }

        if self.directory.default_selection == 0 {
            anyhow::bail!("default_selection нумеруется с 1");
        }

        // Валидация источника детекций
        match self.trigger.source.as_str() {
            "stdin" | "emulated" => {}
            _ => anyhow::bail!("Неверный источник детекций: {}", self.trigger.source),
        }

        if self.trigger.emulated_interval_ms < 10 {
            anyhow::bail!("emulated_interval_ms должно быть минимум 10");
        }

        Ok(())
    }

    pub fn retry_cooldown(&self) -> Duration {
        Duration::from_millis(self.trigger.retry_cooldown_ms)
    }
}
