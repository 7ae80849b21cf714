use crate::config::Config;
use crate::error::Result;
use crate::events::{DetectionEvent, FocusAttemptOutcome, WindowIdentity};
use crate::services::detection_trigger::DetectionTriggerTrait;
use crate::services::FocusEngine;
use crate::{debug_if_enabled, switch_error, trace_if_enabled};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Итог работы цикла детекции
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub attempts: u32,
    pub last_outcome: Option<FocusAttemptOutcome>,
}

pub struct Orchestrator {
    config: Arc<Config>,
    engine: Arc<FocusEngine>,
    target: WindowIdentity,
}

impl Orchestrator {
    pub fn new(config: Arc<Config>, engine: Arc<FocusEngine>, target: WindowIdentity) -> Self {
        info!("Инициализация Orchestrator, целевое окно: {}", target);
        Self {
            config,
            engine,
            target,
        }
    }

    /// Обрабатывает кадры до успеха, устаревшего дескриптора или конца источника.
    /// Следующий кадр читается только после завершения попытки захвата фокуса.
    pub async fn run(&self, trigger: &mut dyn DetectionTriggerTrait) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut previous_count = 0u32;
        let mut cooldown_until: Option<Instant> = None;

        while let Some(event) = trigger.next_event().await? {
            summary.frames += 1;
            trace_if_enabled!("Кадр #{}: {}", summary.frames, event);

            if event.person_count != previous_count {
                info!("Людей в зоне: {}", event.person_count);
            }
            let rising_edge = previous_count == 0 && event.has_person();
            previous_count = event.person_count;

            if !self.should_fire(&event, rising_edge, cooldown_until) {
                continue;
            }

            summary.attempts += 1;
            let outcome = self.attempt().await?;
            info!("{}", outcome);

            let stop = match &outcome {
                FocusAttemptOutcome::Success { .. } => self.config.trigger.stop_on_success,
                FocusAttemptOutcome::StaleHandle { .. } => {
                    warn!(
                        "Окно \"{}\" закрыто, перезапустите с обновлённым списком окон",
                        outcome.title()
                    );
                    true
                }
                FocusAttemptOutcome::PermissionDenied { .. } => {
                    cooldown_until = Some(Instant::now() + self.config.retry_cooldown());
                    false
                }
            };

            summary.last_outcome = Some(outcome);
            if stop {
                break;
            }
        }

        info!(
            "Цикл детекции завершён: кадров {}, попыток {}",
            summary.frames, summary.attempts
        );
        Ok(summary)
    }

    fn should_fire(&self, event: &DetectionEvent, rising_edge: bool, cooldown_until: Option<Instant>) -> bool {
        if !event.has_person() {
            return false;
        }
        if self.config.trigger.rising_edge_only && !rising_edge {
            return false;
        }
        if let Some(until) = cooldown_until {
            if Instant::now() < until {
                debug_if_enabled!("Повторная попытка отложена до окончания паузы");
                return false;
            }
        }
        true
    }

    /// Движок блокирующий (sleep внутри стратегий), поэтому выполняется в blocking-пуле
    async fn attempt(&self) -> Result<FocusAttemptOutcome> {
        let engine = Arc::clone(&self.engine);
        let target = self.target.clone();

        tokio::task::spawn_blocking(move || engine.acquire_focus(&target))
            .await
            .map_err(|e| switch_error!(internal, "Задача захвата фокуса прервана: {}", e))
    }
}
