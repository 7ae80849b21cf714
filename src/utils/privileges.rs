use tracing::{info, warn};

/// Подсказка пользователю, когда все стратегии исчерпаны
pub const ELEVATION_HINT: &str =
    "Возможно, окно требует прав администратора. Попробуйте запустить программу от имени администратора.";

/// Проверить права процесса и предупредить о возможных ограничениях
pub fn check_privileges(dry_run: bool) {
    info!("Проверка прав доступа...");

    if dry_run {
        info!("Dry-run режим - проверка прав пропущена");
        return;
    }

    match is_elevated() {
        Some(true) => info!("Процесс запущен с правами администратора"),
        Some(false) => {
            warn!("⚠️  Процесс запущен без прав администратора");
            warn!("   Windows не позволит передать фокус окнам процессов с повышенными правами");
            warn!("   (диспетчер задач, консоли администратора и т.п.)");
        }
        None => {
            warn!("⚠️  Управление фокусом окон поддерживается только на Windows");
            warn!("   Используйте --dry-run для проверки конфигурации");
        }
    }
}

/// `None` - платформа не поддерживается
#[cfg(windows)]
pub fn is_elevated() -> Option<bool> {
    use windows::Win32::UI::Shell::IsUserAnAdmin;
    Some(unsafe { IsUserAnAdmin() }.as_bool())
}

#[cfg(not(windows))]
pub fn is_elevated() -> Option<bool> {
    None
}
