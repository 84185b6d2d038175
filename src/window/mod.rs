use glfw::{
    fail_on_errors, Action, ClientApiHint, Glfw, GlfwReceiver, Key, PWindow, WindowEvent,
    WindowHint, WindowMode,
};
use tracing::{debug, trace};

use crate::{config::WindowConfig, BootstrapError};

/// Anything that can be polled for OS events and asked whether it wants to close.
pub trait EventPump {
    fn should_close(&self) -> bool;
    fn poll_events(&mut self);
}

/// Polls `pump` until its close flag is set. Returns the number of polls performed.
pub fn run_event_loop(pump: &mut impl EventPump) -> usize {
    let mut polls = 0;
    while !pump.should_close() {
        pump.poll_events();
        polls += 1;
    }
    debug!("Event loop finished after {polls} polls");
    polls
}

/// Owns the GLFW context and the single application window.
pub struct WindowManager {
    // declared before `glfw` so the window is destroyed before GLFW terminates
    window: PWindow,
    receiver: GlfwReceiver<(f64, WindowEvent)>,
    glfw: Glfw,
}

impl WindowManager {
    pub fn try_new(config: &WindowConfig) -> Result<Self, BootstrapError> {
        let mut glfw = glfw::init(fail_on_errors!())?;
        // the graphics API is managed by ash, not GLFW
        glfw.window_hint(WindowHint::ClientApi(ClientApiHint::NoApi));
        let (mut window, events) = glfw
            .create_window(
                config.width,
                config.height,
                &config.title,
                WindowMode::Windowed,
            )
            .ok_or(BootstrapError::WindowCreation {
                width: config.width,
                height: config.height,
            })?;
        window.set_key_polling(true);
        debug!(
            "Created window \"{}\" ({}x{})",
            config.title, config.width, config.height
        );

        Ok(Self {
            window,
            glfw,
            receiver: events,
        })
    }

    /// Instance extensions GLFW needs to present to this platform's windows.
    pub fn required_instance_extensions(&self) -> Result<Vec<String>, BootstrapError> {
        if !self.glfw.vulkan_supported() {
            return Err(BootstrapError::VulkanUnsupported);
        }
        self.glfw
            .get_required_instance_extensions()
            .ok_or(BootstrapError::VulkanUnsupported)
    }
}

impl EventPump for WindowManager {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn poll_events(&mut self) {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.receiver) {
            trace!("{:?}", event);
            if let WindowEvent::Key(Key::Escape, _, Action::Press, _) = event {
                self.window.set_should_close(true);
            }
        }
    }
}

impl Drop for WindowManager {
    fn drop(&mut self) {
        debug!("Dropping WindowManager");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Closes itself after `close_after` polls.
    struct FakePump {
        polls: usize,
        close_after: usize,
    }

    impl EventPump for FakePump {
        fn should_close(&self) -> bool {
            self.polls >= self.close_after
        }

        fn poll_events(&mut self) {
            self.polls += 1;
        }
    }

    #[test]
    fn loop_exits_without_polling_when_already_closed() {
        let mut pump = FakePump {
            polls: 0,
            close_after: 0,
        };
        assert_eq!(run_event_loop(&mut pump), 0);
    }

    #[test]
    fn loop_polls_until_close_is_requested() {
        let mut pump = FakePump {
            polls: 0,
            close_after: 5,
        };
        assert_eq!(run_event_loop(&mut pump), 5);
        assert!(pump.should_close());
    }
}
