use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
mod config;
mod error;
mod events;
mod services;
mod utils;

use config::Config;
use error::SwitchError;
use events::WindowIdentity;
use services::{
    create_detection_trigger,
    create_platform,
    create_window_directory,
    FocusEngine,
    FocusSettings,
    Orchestrator,
    WindowSnapshot,
};

#[derive(Parser, Debug)]
#[command(name = "presence-switch")]
#[command(about = "Переключает фокус на выбранное окно, когда детектор видит человека в кадре")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "presence-switch.toml")]
    config: String,

    /// Режим сухого запуска (без реальных действий)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (перекрывает logging.level и logging.filter)
    #[arg(long)]
    log_level: Option<String>,

    /// Показать список окон и выйти
    #[arg(long)]
    list: bool,

    /// Номер целевого окна в списке (с 1)
    #[arg(short, long, conflicts_with = "title")]
    select: Option<usize>,

    /// Выбрать первое окно, заголовок которого содержит строку
    #[arg(short, long)]
    title: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config = Arc::new(Config::load(&args.config)?);

    // Инициализация системы логирования
    init_tracing(&config, args.log_level.as_deref())?;

    info!("Запуск Presence Switch v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    }

    // Проверка прав доступа
    utils::privileges::check_privileges(args.dry_run);

    // Снимок окон делается один раз, дальше дескрипторы только перепроверяются
    let directory = create_window_directory(config.clone(), args.dry_run)?;
    let snapshot = directory.enumerate()?;
    display_windows(&snapshot);

    if args.list {
        return Ok(());
    }

    let target = select_target(&snapshot, &args, &config)?;
    info!("Целевое окно: {} (снимок {}мс назад)", target, snapshot.age_ms());

    // Инициализация компонентов
    let platform = create_platform(args.dry_run)?;
    let engine = Arc::new(FocusEngine::new(platform, FocusSettings::from_config(&config.focus)));
    let orchestrator = Orchestrator::new(config.clone(), engine, target);
    let mut trigger = create_detection_trigger(config.clone(), args.dry_run)?;

    info!("Все компоненты инициализированы, ожидаем детекции");

    // Попытка захвата фокуса не отменяется посреди выполнения: Ctrl+C
    // прерывает только ожидание следующего кадра
    tokio::select! {
        result = orchestrator.run(trigger.as_mut()) => {
            match result {
                Ok(summary) => match summary.last_outcome {
                    Some(outcome) if outcome.is_success() => info!("Готово: {}", outcome),
                    Some(outcome) => warn!("Последний результат: {}", outcome),
                    None => info!("Человек в кадре так и не появился"),
                },
                Err(e) => error!("Ошибка в Orchestrator: {}", e),
            }
        }
        signal_result = signal::ctrl_c() => {
            match signal_result {
                Ok(()) => info!("Получен сигнал завершения (Ctrl+C)"),
                Err(err) => error!("Ошибка при ожидании сигнала завершения: {}", err),
            }
        }
    }

    info!("Presence Switch завершил работу");
    Ok(())
}

fn display_windows(snapshot: &WindowSnapshot) {
    println!("\n=== Open Application Windows ===");
    for line in snapshot.display_lines() {
        println!("{}", line);
    }
    println!("================================\n");
}

fn select_target(snapshot: &WindowSnapshot, args: &Args, config: &Config) -> error::Result<WindowIdentity> {
    if snapshot.is_empty() {
        return SwitchError::window_not_found("не найдено ни одного окна приложения");
    }

    if let Some(pattern) = &args.title {
        return snapshot
            .find_by_title(pattern)
            .cloned()
            .ok_or_else(|| switch_error!(window_not_found, "нет окна с заголовком, содержащим '{}'", pattern));
    }

    let position = args.select.unwrap_or(config.directory.default_selection);
    snapshot.get(position).cloned().ok_or_else(|| {
        switch_error!(
            window_not_found,
            "номер {} вне списка (доступно окон: {})",
            position,
            snapshot.len()
        )
    })
}

fn init_tracing(config: &Config, level_override: Option<&str>) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let directives = match level_override {
        Some(level) => level.to_string(),
        None => format!("{},{}", config.logging.level, config.logging.filter),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&directives))?;

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format.as_str() {
        "compact" => registry.with(tracing_subscriber::fmt::layer().compact()).init(),
        _ => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
    }

    Ok(())
}
