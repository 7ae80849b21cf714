use crate::config::FocusConfig;
use crate::debug_if_enabled;
use crate::error::{PlatformError, PlatformResult};
use crate::events::{FocusAttemptOutcome, Strategy, WindowHandle, WindowIdentity};
use crate::services::platform::{ModifierKey, ShowCommand, WindowPlatform};
use crate::utils::privileges::ELEVATION_HINT;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

// Одна попытка на процесс: фокус и таблица AttachThreadInput глобальны
static ATTEMPT_LOCK: Mutex<()> = Mutex::new(());

/// Задержки и параметры стратегий
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusSettings {
    pub restore_settle_delay: Duration,
    pub workaround_key_delay: Duration,
    pub modifier_key: ModifierKey,
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            restore_settle_delay: Duration::from_millis(100),
            workaround_key_delay: Duration::from_millis(50),
            modifier_key: ModifierKey::Alt,
        }
    }
}

impl FocusSettings {
    pub fn from_config(config: &FocusConfig) -> Self {
        Self {
            restore_settle_delay: Duration::from_millis(config.restore_settle_delay_ms),
            workaround_key_delay: Duration::from_millis(config.workaround_key_delay_ms),
            modifier_key: ModifierKey::from_name(&config.modifier_key).unwrap_or(ModifierKey::Alt),
        }
    }
}

/// Отказ одной стратегии. Наружу не выходит, только переводит движок к следующей.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{strategy}: {source}")]
pub struct StrategyFailed {
    pub strategy: Strategy,
    #[source]
    pub source: PlatformError,
}

/// Связь ввода двух потоков. Drop всегда выполняет detach, даже если attach
/// вернул ошибку или SetForegroundWindow не сработал.
struct ThreadInputAttachment<'a> {
    platform: &'a dyn WindowPlatform,
    from_thread: u32,
    to_thread: u32,
    attach_result: PlatformResult<()>,
}

impl<'a> ThreadInputAttachment<'a> {
    fn attach(platform: &'a dyn WindowPlatform, from_thread: u32, to_thread: u32) -> Self {
        debug_if_enabled!("AttachThreadInput {} -> {}", from_thread, to_thread);
        let attach_result = platform.attach_thread_input(from_thread, to_thread, true);
        Self {
            platform,
            from_thread,
            to_thread,
            attach_result,
        }
    }

    fn status(&self) -> PlatformResult<()> {
        self.attach_result.clone()
    }
}

impl Drop for ThreadInputAttachment<'_> {
    fn drop(&mut self) {
        if let Err(e) = self
            .platform
            .attach_thread_input(self.from_thread, self.to_thread, false)
        {
            warn!(
                "Не удалось отсоединить ввод потоков {} -> {}: {}",
                self.from_thread, self.to_thread, e
            );
        }
    }
}

/// Движок захвата фокуса: стратегии перебираются строго по порядку до первого успеха
pub struct FocusEngine {
    platform: Arc<dyn WindowPlatform>,
    settings: FocusSettings,
}

impl FocusEngine {
    pub fn new(platform: Arc<dyn WindowPlatform>, settings: FocusSettings) -> Self {
        info!(
            "Инициализация FocusEngine (restore: {}мс, keystroke: {}мс, модификатор: {})",
            settings.restore_settle_delay.as_millis(),
            settings.workaround_key_delay.as_millis(),
            settings.modifier_key
        );
        Self { platform, settings }
    }

    /// Проверка существования окна. Никогда не падает: любая ошибка означает "нет".
    pub fn is_valid(&self, identity: &WindowIdentity) -> bool {
        self.platform.is_window(identity.handle())
    }

    /// Блокирующая попытка вывести окно на передний план.
    ///
    /// Всегда завершается одним из вариантов [`FocusAttemptOutcome`]; худший случай
    /// по времени ограничен только фиксированными задержками стратегий.
    pub fn acquire_focus(&self, identity: &WindowIdentity) -> FocusAttemptOutcome {
        let _attempt = ATTEMPT_LOCK.lock();
        let title = identity.title().to_string();

        if !self.is_valid(identity) {
            warn!("✗ Окно {} больше не существует. Обновите список окон.", identity);
            return FocusAttemptOutcome::StaleHandle { title };
        }

        let mut failures: Vec<StrategyFailed> = Vec::with_capacity(Strategy::ORDER.len());

        for strategy in Strategy::ORDER {
            debug_if_enabled!("Пробуем стратегию {} для {}", strategy, identity);

            match self.run_strategy(strategy, identity.handle()) {
                Ok(()) => {
                    info!("✓ Переключено на: {} (стратегия {})", title, strategy);
                    return FocusAttemptOutcome::Success { title, strategy };
                }
                Err(failure) => {
                    debug!("Стратегия не сработала, переходим к следующей: {}", failure);
                    failures.push(failure);
                }
            }
        }

        let last_failure = failures
            .last()
            .map(ToString::to_string)
            .unwrap_or_default();

        error!("✗ Не удалось переключиться на {}: {}", identity, last_failure);
        error!("   {}", ELEVATION_HINT);

        FocusAttemptOutcome::PermissionDenied {
            title,
            reason: format!("{}. {}", last_failure, ELEVATION_HINT),
        }
    }

    fn run_strategy(&self, strategy: Strategy, handle: WindowHandle) -> Result<(), StrategyFailed> {
        let result = match strategy {
            Strategy::Standard => self.try_standard(handle),
            Strategy::KeystrokeWorkaround => self.try_keystroke_workaround(handle),
            Strategy::ThreadAttach => self.try_thread_attach(handle),
        };
        result.map_err(|source| StrategyFailed { strategy, source })
    }

    fn try_standard(&self, handle: WindowHandle) -> PlatformResult<()> {
        let state = self.platform.window_state(handle)?;
        debug_if_enabled!(
            "Окно {}: свёрнуто={}, видимо={}, pid={}",
            handle,
            state.is_minimized,
            state.is_visible,
            state.owner_process_id
        );

        if state.is_minimized {
            self.platform.show_window(handle, ShowCommand::Restore)?;
            // Без паузы SetForegroundWindow сразу после restore ненадёжен
            self.platform.sleep(self.settings.restore_settle_delay);
        }

        self.platform.show_window(handle, ShowCommand::Show)?;
        // Успех не перепроверяется запросом активного окна
        self.platform.set_foreground(handle)
    }

    fn try_keystroke_workaround(&self, handle: WindowHandle) -> PlatformResult<()> {
        self.platform.show_window(handle, ShowCommand::Show)?;
        self.platform.sleep(self.settings.workaround_key_delay);

        // Нажатие модификатора возвращает процессу право менять активное окно
        self.platform.send_modifier_keystroke(self.settings.modifier_key)?;
        self.platform.sleep(self.settings.workaround_key_delay);

        self.platform.set_foreground(handle)
    }

    fn try_thread_attach(&self, handle: WindowHandle) -> PlatformResult<()> {
        let foreground_thread = self.platform.foreground_thread_id()?;
        let target_thread = self.platform.window_state(handle)?.owner_thread_id;

        if foreground_thread == target_thread {
            debug_if_enabled!("Окно уже принадлежит потоку переднего плана {}", target_thread);
            return self.platform.set_foreground(handle);
        }

        let attachment =
            ThreadInputAttachment::attach(self.platform.as_ref(), foreground_thread, target_thread);
        attachment.status()?;

        let result = self.platform.set_foreground(handle);
        drop(attachment);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::platform::scripted::{PlatformCall, ScriptedPlatform};

    const HANDLE: WindowHandle = WindowHandle(42);

    fn notepad() -> WindowIdentity {
        WindowIdentity::new(HANDLE, "Notepad")
    }

    fn engine(platform: &Arc<ScriptedPlatform>) -> FocusEngine {
        FocusEngine::new(platform.clone(), FocusSettings::default())
    }

    fn position(calls: &[PlatformCall], predicate: impl Fn(&PlatformCall) -> bool) -> usize {
        calls.iter().position(predicate).expect("call not recorded")
    }

    #[test]
    fn test_standard_success_without_restore() {
        let platform = Arc::new(ScriptedPlatform::new());
        let outcome = engine(&platform).acquire_focus(&notepad());

        assert_eq!(
            outcome,
            FocusAttemptOutcome::Success {
                title: "Notepad".to_string(),
                strategy: Strategy::Standard,
            }
        );
        assert!(platform.sleeps().is_empty());
        assert_eq!(
            platform.calls(),
            vec![
                PlatformCall::IsWindow(HANDLE),
                PlatformCall::WindowState(HANDLE),
                PlatformCall::Show(HANDLE, ShowCommand::Show),
                PlatformCall::SetForeground(HANDLE),
            ]
        );
    }

    #[test]
    fn test_stale_handle_short_circuits() {
        let platform = Arc::new(ScriptedPlatform::new().stale());
        let outcome = engine(&platform).acquire_focus(&notepad());

        assert_eq!(
            outcome,
            FocusAttemptOutcome::StaleHandle {
                title: "Notepad".to_string()
            }
        );
        assert_eq!(platform.calls(), vec![PlatformCall::IsWindow(HANDLE)]);
        assert_eq!(platform.count(PlatformCall::is_mutation), 0);
        assert!(platform.sleeps().is_empty());
    }

    #[test]
    fn test_minimized_window_falls_back_to_keystroke() {
        let platform = Arc::new(ScriptedPlatform::new().minimized().foreground_results(&[false, true]));
        let outcome = engine(&platform).acquire_focus(&notepad());

        assert_eq!(
            outcome,
            FocusAttemptOutcome::Success {
                title: "Notepad".to_string(),
                strategy: Strategy::KeystrokeWorkaround,
            }
        );
        assert_eq!(
            platform.sleeps(),
            vec![
                Duration::from_millis(100),
                Duration::from_millis(50),
                Duration::from_millis(50),
            ]
        );
        assert_eq!(
            platform.count(|c| *c == PlatformCall::Show(HANDLE, ShowCommand::Restore)),
            1
        );
        assert_eq!(platform.count(|c| *c == PlatformCall::ForegroundThread), 0);
        assert_eq!(platform.count(|c| matches!(c, PlatformCall::Attach { .. })), 0);
    }

    #[test]
    fn test_all_strategies_fail_still_detaches() {
        let platform = Arc::new(ScriptedPlatform::new().foreground_results(&[false, false, false]));
        let outcome = engine(&platform).acquire_focus(&notepad());

        match &outcome {
            FocusAttemptOutcome::PermissionDenied { title, reason } => {
                assert_eq!(title, "Notepad");
                assert!(reason.contains(ELEVATION_HINT));
                assert!(reason.starts_with("thread-attach"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let calls = platform.calls();
        let attach = PlatformCall::Attach {
            from: ScriptedPlatform::FOREGROUND_THREAD,
            to: ScriptedPlatform::TARGET_THREAD,
        };
        let detach = PlatformCall::Detach {
            from: ScriptedPlatform::FOREGROUND_THREAD,
            to: ScriptedPlatform::TARGET_THREAD,
        };
        assert_eq!(platform.count(|c| *c == attach), 1);
        assert_eq!(platform.count(|c| *c == detach), 1);

        let last_foreground = calls
            .iter()
            .rposition(|c| *c == PlatformCall::SetForeground(HANDLE))
            .unwrap();
        assert!(position(&calls, |c| *c == attach) < last_foreground);
        assert!(position(&calls, |c| *c == detach) > last_foreground);
    }

    #[test]
    fn test_failed_attach_is_still_detached() {
        let platform = Arc::new(
            ScriptedPlatform::new()
                .failing_attach()
                .foreground_results(&[false, false]),
        );
        let outcome = engine(&platform).acquire_focus(&notepad());

        assert!(matches!(outcome, FocusAttemptOutcome::PermissionDenied { .. }));
        assert_eq!(platform.count(|c| matches!(c, PlatformCall::Attach { .. })), 1);
        assert_eq!(platform.count(|c| matches!(c, PlatformCall::Detach { .. })), 1);
        // Третий SetForegroundWindow не вызывается при неудачном attach
        assert_eq!(platform.count(|c| *c == PlatformCall::SetForeground(HANDLE)), 2);
    }

    #[test]
    fn test_same_thread_skips_attach() {
        let platform = Arc::new(
            ScriptedPlatform::new()
                .same_thread()
                .foreground_results(&[false, false]),
        );
        let outcome = engine(&platform).acquire_focus(&notepad());

        assert_eq!(
            outcome,
            FocusAttemptOutcome::Success {
                title: "Notepad".to_string(),
                strategy: Strategy::ThreadAttach,
            }
        );
        assert_eq!(platform.count(|c| matches!(c, PlatformCall::Attach { .. })), 0);
        assert_eq!(platform.count(|c| matches!(c, PlatformCall::Detach { .. })), 0);
    }

    #[test]
    fn test_strategies_run_in_fixed_order() {
        let platform = Arc::new(ScriptedPlatform::new().foreground_results(&[false, false]));
        let outcome = engine(&platform).acquire_focus(&notepad());

        assert_eq!(
            outcome,
            FocusAttemptOutcome::Success {
                title: "Notepad".to_string(),
                strategy: Strategy::ThreadAttach,
            }
        );

        let calls = platform.calls();
        let standard = position(&calls, |c| *c == PlatformCall::WindowState(HANDLE));
        let keystroke = position(&calls, |c| matches!(c, PlatformCall::Keystroke(_)));
        let attach = position(&calls, |c| matches!(c, PlatformCall::Attach { .. }));
        assert!(standard < keystroke);
        assert!(keystroke < attach);
        assert_eq!(platform.count(|c| *c == PlatformCall::SetForeground(HANDLE)), 3);
    }

    #[test]
    fn test_keystroke_success_stops_before_thread_attach() {
        let platform = Arc::new(ScriptedPlatform::new().foreground_results(&[false]));
        let outcome = engine(&platform).acquire_focus(&notepad());

        assert_eq!(
            outcome,
            FocusAttemptOutcome::Success {
                title: "Notepad".to_string(),
                strategy: Strategy::KeystrokeWorkaround,
            }
        );
        assert_eq!(platform.count(|c| *c == PlatformCall::ForegroundThread), 0);
        assert_eq!(
            platform.count(|c| *c == PlatformCall::Keystroke(ModifierKey::Alt)),
            1
        );
    }

    #[test]
    fn test_keystroke_dispatch_failure_falls_through() {
        let platform = Arc::new(
            ScriptedPlatform::new()
                .failing_keystroke()
                .foreground_results(&[false]),
        );
        let outcome = engine(&platform).acquire_focus(&notepad());

        assert_eq!(
            outcome,
            FocusAttemptOutcome::Success {
                title: "Notepad".to_string(),
                strategy: Strategy::ThreadAttach,
            }
        );
        // Стратегия 2 обрывается на SendInput, до SetForegroundWindow не доходит
        assert_eq!(platform.count(|c| *c == PlatformCall::SetForeground(HANDLE)), 2);
        assert_eq!(platform.count(|c| matches!(c, PlatformCall::Detach { .. })), 1);
    }

    #[test]
    fn test_repeated_attempts_are_idempotent() {
        let platform = Arc::new(ScriptedPlatform::new());
        let engine = engine(&platform);

        assert!(engine.acquire_focus(&notepad()).is_success());
        assert!(engine.acquire_focus(&notepad()).is_success());
    }

    #[test]
    fn test_settings_from_config() {
        let config = FocusConfig {
            restore_settle_delay_ms: 0,
            workaround_key_delay_ms: 10,
            modifier_key: "shift".to_string(),
        };
        let settings = FocusSettings::from_config(&config);

        assert_eq!(settings.restore_settle_delay, Duration::ZERO);
        assert_eq!(settings.workaround_key_delay, Duration::from_millis(10));
        assert_eq!(settings.modifier_key, ModifierKey::Shift);
    }
}
