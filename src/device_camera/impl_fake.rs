use crate::config::CameraConfig;
use crate::device_camera::interface::{DeviceCamera, Frame};
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    config: CameraConfig,
    started: AtomicBool,
    permission_denied: bool,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, config: CameraConfig) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            config,
            started: AtomicBool::new(false),
            permission_denied: false,
        }
    }

    #[allow(dead_code)]
    pub fn denied(logger: Arc<dyn Logger + Send + Sync>, config: CameraConfig) -> Self {
        Self {
            permission_denied: true,
            ..Self::new(logger, config)
        }
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!(
            "Starting camera {}x{} (flip: {})...",
            self.config.width, self.config.height, self.config.flip
        ))?;
        if self.permission_denied {
            return Err("camera permission denied".into());
        }
        self.started.store(true, Ordering::SeqCst);
        self.logger.info("Camera started")?;
        Ok(())
    }

    fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.started.swap(false, Ordering::SeqCst) {
            self.logger.info("Camera stopped")?;
        }
        Ok(())
    }

    fn capture_frame(&self) -> Result<Frame, Box<dyn std::error::Error + Send + Sync>> {
        if !self.is_started() {
            return Err("camera is not started".into());
        }

        let mut rng = rand::rng();
        let channel = Uniform::new_inclusive(0u8, 255)?;
        let left = [
            channel.sample(&mut rng),
            channel.sample(&mut rng),
            channel.sample(&mut rng),
        ];
        let right = [
            channel.sample(&mut rng),
            channel.sample(&mut rng),
            channel.sample(&mut rng),
        ];

        let width = self.config.width.max(1);
        let height = self.config.height;
        let mut row = Vec::with_capacity(width as usize * 3);
        for x in 0..width {
            let t = x as f32 / width as f32;
            for c in 0..3 {
                row.push((left[c] as f32 * (1.0 - t) + right[c] as f32 * t) as u8);
            }
        }
        if self.config.flip {
            row = row.chunks(3).rev().flatten().copied().collect();
        }

        let mut pixels = Vec::with_capacity(row.len() * height as usize);
        for _ in 0..height {
            pixels.extend_from_slice(&row);
        }

        Ok(Frame {
            width,
            height,
            pixels,
        })
    }
}
