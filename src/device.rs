//! Device bridge control
//!
//! Launching the remote camera app and setting up reverse port-forwarding
//! are fire-and-forget external invocations: their success or failure is
//! logged, never propagated, because a manually prepared device is a
//! normal way to run a measurement. The [`DeviceController`] trait keeps
//! the bridge mockable in tests.

use std::process::Command;

use tracing::{info, warn};

/// Activity started on the device, with the listening port passed as an
/// extra
const CAMERA_ACTIVITY: &str =
    "com.android.example.camera2.slowmo/com.example.android.camera2.slowmo.CameraActivity";

/// Capability to prepare the remote device for a measurement run
pub trait DeviceController {
    /// Start the camera app, telling it which host port to dial back to.
    /// Returns whether the launch command succeeded.
    fn launch_app(&self, port: u16) -> bool;

    /// Reverse-forward `port` from the device to the same host port.
    /// Returns whether the forwarding command succeeded.
    fn forward_port(&self, port: u16) -> bool;
}

/// Controller that drives a device over the `adb` bridge
#[derive(Debug, Clone)]
pub struct AdbDeviceController {
    adb_path: String,
}

impl AdbDeviceController {
    /// Create a controller using the given adb binary
    pub fn new(adb_path: impl Into<String>) -> Self {
        Self {
            adb_path: adb_path.into(),
        }
    }

    /// Run one adb invocation, logging output; returns success
    fn run_logged(&self, args: &[String]) -> bool {
        match Command::new(&self.adb_path).args(args).output() {
            Ok(output) if output.status.success() => {
                info!(
                    command = %args.join(" "),
                    stdout = %String::from_utf8_lossy(&output.stdout).trim(),
                    "device command succeeded"
                );
                true
            }
            Ok(output) => {
                warn!(
                    command = %args.join(" "),
                    status = %output.status,
                    stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                    "device command failed, continuing"
                );
                false
            }
            Err(e) => {
                warn!(
                    command = %args.join(" "),
                    error = %e,
                    "device command could not be spawned, continuing"
                );
                false
            }
        }
    }
}

impl DeviceController for AdbDeviceController {
    fn launch_app(&self, port: u16) -> bool {
        let args: Vec<String> = [
            "shell",
            "am",
            "start",
            "-n",
            CAMERA_ACTIVITY,
            "--es",
            &format!("port {port}"),
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        self.run_logged(&args)
    }

    fn forward_port(&self, port: u16) -> bool {
        let args: Vec<String> = vec![
            "reverse".to_string(),
            format!("tcp:{port}"),
            format!("tcp:{port}"),
        ];
        self.run_logged(&args)
    }
}
