use atf_config::input::InputConfig;
use atf_core::{DeviceError, InputEmitter};
use atf_types::{Direction, MenuAction};

/// Stand-in controller that logs every press and keeps the press timing
pub struct TracingEmitter {
    timing: InputConfig,
}

impl TracingEmitter {
    pub fn new(timing: InputConfig) -> Self {
        Self { timing }
    }

    async fn act(&self, action: MenuAction) -> Result<(), DeviceError> {
        tracing::info!("Gamepad: pressing {}", action);
        tokio::time::sleep(self.timing.hold()).await;
        tracing::debug!("Gamepad: releasing {}", action);
        tokio::time::sleep(self.timing.release()).await;
        Ok(())
    }
}

#[async_trait::async_trait]
impl InputEmitter for TracingEmitter {
    async fn press_direction(&self, direction: Direction) -> Result<(), DeviceError> {
        self.act(MenuAction::Move(direction)).await
    }

    async fn press_confirm(&self) -> Result<(), DeviceError> {
        self.act(MenuAction::Confirm).await
    }

    async fn press_back(&self) -> Result<(), DeviceError> {
        self.act(MenuAction::Back).await
    }
}
