use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeAlign {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskbarConfig {
    #[serde(default = "default_orientation")]
    pub orientation: Orientation,
    #[serde(default = "default_icon_size")]
    pub icon_size: u32,
    #[serde(default = "default_show_apps_position")]
    pub show_apps_position: EdgeAlign,
    #[serde(default = "default_icon_alignment")]
    pub icon_alignment: EdgeAlign,
}

fn default_orientation() -> Orientation {
    Orientation::Horizontal
}

fn default_icon_size() -> u32 {
    48
}

fn default_show_apps_position() -> EdgeAlign {
    EdgeAlign::Start
}

fn default_icon_alignment() -> EdgeAlign {
    EdgeAlign::Center
}

impl Default for TaskbarConfig {
    fn default() -> Self {
        Self {
            orientation: default_orientation(),
            icon_size: default_icon_size(),
            show_apps_position: default_show_apps_position(),
            icon_alignment: default_icon_alignment(),
        }
    }
}

impl TaskbarConfig {
    pub fn config_dir() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "flexi_taskbar", "flexi_taskbar")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn load() -> Self {
        if let Some(config_dir) = Self::config_dir() {
            let config_path = config_dir.join("config.json");
            if config_path.exists() {
                if let Ok(file) = std::fs::File::open(config_path) {
                    if let Ok(config) = serde_json::from_reader(file) {
                        return config;
                    } else {
                        warn!("Failed to parse config, using default");
                    }
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) {
        if let Some(config_dir) = Self::config_dir() {
            if std::fs::create_dir_all(&config_dir).is_ok() {
                let config_path = config_dir.join("config.json");
                if let Ok(file) = std::fs::File::create(config_path) {
                    let _ = serde_json::to_writer_pretty(file, self);
                }
            }
        }
    }
}
