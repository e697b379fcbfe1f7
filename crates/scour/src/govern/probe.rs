use std::path::{Path, PathBuf};
use std::time::Duration;

use sysinfo::{Disks, System};

/// Memory and disk usage percentages taken at a checkpoint. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceSample {
    pub memory_percent: f32,
    pub disk_percent: f32,
}

/// Source of resource samples. The governor only ever needs these two
/// numbers per checkpoint; tests script them.
pub trait ResourceProbe {
    fn sample(&mut self) -> ResourceSample;
}

/// The cooldown pause seam: production sleeps, tests record.
pub trait CooldownClock {
    fn pause(&mut self, duration: Duration);
}

pub struct WallClock;

impl CooldownClock for WallClock {
    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Live system probe: process-host memory usage and filesystem usage of the
/// volume holding `volume` (typically the output path).
pub struct SystemProbe {
    system: System,
    disks: Disks,
    volume: PathBuf,
}

impl SystemProbe {
    pub fn new(volume: &Path) -> Self {
        Self {
            system: System::new(),
            disks: Disks::new_with_refreshed_list(),
            volume: volume.to_path_buf(),
        }
    }

    fn disk_percent(&self) -> f32 {
        let volume = std::path::absolute(&self.volume).unwrap_or_else(|_| self.volume.clone());

        // The disk with the longest mount point that prefixes the volume
        // path is the filesystem the output lands on.
        let mut best: Option<&sysinfo::Disk> = None;
        let mut best_len = 0;
        for disk in self.disks.list() {
            let mount = disk.mount_point();
            if volume.starts_with(mount) && mount.as_os_str().len() >= best_len {
                best_len = mount.as_os_str().len();
                best = Some(disk);
            }
        }

        match best {
            Some(disk) if disk.total_space() > 0 => {
                let used = disk.total_space() - disk.available_space();
                used as f32 / disk.total_space() as f32 * 100.0
            }
            _ => 0.0,
        }
    }
}

impl ResourceProbe for SystemProbe {
    fn sample(&mut self) -> ResourceSample {
        self.system.refresh_memory();
        self.disks.refresh();

        let total = self.system.total_memory();
        let memory_percent = if total == 0 {
            0.0
        } else {
            self.system.used_memory() as f32 / total as f32 * 100.0
        };

        ResourceSample {
            memory_percent,
            disk_percent: self.disk_percent(),
        }
    }
}
