use crate::error::Result;
use crate::events::DetectionEvent;
use crate::trace_if_enabled;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};

use super::r#trait::DetectionTriggerTrait;

/// Читает количество людей построчно: внешний детектор пишет одно число на кадр
pub struct LineTrigger<R> {
    lines: Lines<R>,
}

impl LineTrigger<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        info!("Источник детекций: stdin (одно число на строку)");
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> LineTrigger<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

fn parse_count(line: &str) -> Option<u32> {
    line.trim().parse::<u32>().ok()
}

#[async_trait::async_trait]
impl<R: AsyncBufRead + Unpin + Send> DetectionTriggerTrait for LineTrigger<R> {
    async fn next_event(&mut self) -> Result<Option<DetectionEvent>> {
        while let Some(line) = self.lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match parse_count(&line) {
                Some(count) => {
                    trace_if_enabled!("Кадр: {} человек", count);
                    return Ok(Some(DetectionEvent::new(count)));
                }
                None => warn!("Некорректная строка от детектора пропущена: '{}'", line),
            }
        }

        info!("Источник детекций закрыт");
        Ok(None)
    }
}
