//! # Config 模块
//!
//! 运行时配置管理。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高，由宿主处理）
//! 2. 配置文件 (JSON)
//! 3. 默认值（最低）

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::animation::{Animation, AnimationCurve, DEFAULT_DURATION, templates::TEMPLATE_DURATION};
use crate::environment::Environment;
use crate::error::ConfigError;
use crate::node::Node;

/// 界面配置
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// 屏幕配置
    #[serde(default)]
    pub screen: ScreenConfig,

    /// 动画默认参数
    #[serde(default)]
    pub animation: AnimationDefaults,

    /// 时间轴配置
    #[serde(default)]
    pub timeline: TimelineConfig,
}

/// 屏幕配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// 屏幕宽度（逻辑像素）
    #[serde(default = "default_screen_width")]
    pub width: f32,

    /// 屏幕高度（逻辑像素）
    #[serde(default = "default_screen_height")]
    pub height: f32,

    /// 缩放比例
    #[serde(default = "default_screen_scale")]
    pub scale: f32,
}

/// 动画默认参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationDefaults {
    /// `Animation` 的默认时长（秒）
    #[serde(default = "default_animation_duration")]
    pub default_duration: f32,

    /// 动画模板的默认时长（秒）
    #[serde(default = "default_template_duration")]
    pub template_duration: f32,

    /// 默认曲线
    #[serde(default)]
    pub default_curve: AnimationCurve,
}

/// 时间轴配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// 宿主推进时间轴的帧率
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
}

// 默认值函数
fn default_screen_width() -> f32 {
    390.0
}

fn default_screen_height() -> f32 {
    844.0
}

fn default_screen_scale() -> f32 {
    3.0
}

fn default_animation_duration() -> f32 {
    DEFAULT_DURATION
}

fn default_template_duration() -> f32 {
    TEMPLATE_DURATION
}

fn default_frame_rate() -> u32 {
    60
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: default_screen_width(),
            height: default_screen_height(),
            scale: default_screen_scale(),
        }
    }
}

impl Default for AnimationDefaults {
    fn default() -> Self {
        Self {
            default_duration: default_animation_duration(),
            template_duration: default_template_duration(),
            default_curve: AnimationCurve::default(),
        }
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
        }
    }
}

impl AnimationDefaults {
    /// 以默认时长和曲线创建动画
    pub fn animation(&self, mutate: impl Fn(&Node) + 'static) -> Animation {
        Animation::new(mutate)
            .with_duration(self.default_duration)
            .with_curve(self.default_curve)
    }

    /// 以模板时长调整模板动画
    ///
    /// 时长总是替换为 `template_duration`；曲线仅在模板仍为默认曲线时替换。
    pub fn template(&self, template: Animation) -> Animation {
        let template = template.with_duration(self.template_duration);
        if template.curve() == AnimationCurve::default() {
            template.with_curve(self.default_curve)
        } else {
            template
        }
    }
}

impl TimelineConfig {
    /// 每帧时长（秒）
    pub fn frame_step(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }
}

impl UiConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并输出警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!(path = %path.display(), "配置文件加载成功");
                    config
                }
                Err(e) => {
                    warn!(error = %e, "配置文件解析失败，使用默认配置");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(error = %e, "配置文件读取失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::Io(e.to_string()))?;

        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("screen.width", self.screen.width)?;
        positive("screen.height", self.screen.height)?;
        positive("screen.scale", self.screen.scale)?;
        non_negative("animation.default_duration", self.animation.default_duration)?;
        non_negative("animation.template_duration", self.animation.template_duration)?;

        if self.timeline.frame_rate == 0 {
            return Err(ConfigError::Invalid {
                field: "timeline.frame_rate",
                message: "必须大于 0".to_string(),
            });
        }

        Ok(())
    }

    /// 由屏幕配置得到运行环境
    pub fn environment(&self) -> Environment {
        Environment::from(&self.screen)
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            message: format!("必须为正数，实际为 {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            message: format!("不能为负数，实际为 {value}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::templates;
    use crate::geometry::Size;

    #[test]
    fn test_default_config() {
        let config = UiConfig::default();
        assert_eq!(config.screen.width, 390.0);
        assert_eq!(config.timeline.frame_rate, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: UiConfig =
            serde_json::from_str(r#"{ "screen": { "width": 1280 }, "animation": { "default_curve": "ease_in_out" } }"#)
                .unwrap();
        assert_eq!(config.screen.width, 1280.0);
        assert_eq!(config.screen.height, 844.0);
        assert_eq!(config.animation.default_curve, AnimationCurve::EaseInOut);
        assert_eq!(config.animation.template_duration, TEMPLATE_DURATION);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = UiConfig::load(dir.path().join("missing.json"));
        assert_eq!(config, UiConfig::default());
    }

    #[test]
    fn test_load_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(UiConfig::load(&path), UiConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = UiConfig::default();
        config.timeline.frame_rate = 30;
        config.animation.default_curve = AnimationCurve::EaseOut;
        config.save(&path).unwrap();

        assert_eq!(UiConfig::load(&path), config);
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = UiConfig::default()
            .save(dir.path().join("no/such/dir/config.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_config_validation() {
        let mut config = UiConfig::default();

        // 无效尺寸
        config.screen.width = 0.0;
        assert!(config.validate().is_err());

        // 恢复有效值
        config.screen.width = 390.0;
        config.animation.default_duration = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "animation.default_duration", .. })
        ));

        config.animation.default_duration = 0.0;
        config.timeline.frame_rate = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_animation_defaults() {
        let defaults = AnimationDefaults {
            default_duration: 1.5,
            template_duration: 2.0,
            default_curve: AnimationCurve::EaseIn,
        };
        let anim = defaults.animation(|_| {});
        assert_eq!(anim.duration(), 1.5);
        assert_eq!(anim.curve(), AnimationCurve::EaseIn);

        let fade = defaults.template(templates::fade_in());
        assert_eq!(fade.duration(), 2.0);
        assert_eq!(fade.curve(), AnimationCurve::EaseIn);
    }

    #[test]
    fn test_template_keeps_caller_curve() {
        let defaults = AnimationDefaults {
            default_curve: AnimationCurve::EaseIn,
            ..AnimationDefaults::default()
        };
        let resize = templates::resize(Size::square(10.0)).with_curve(AnimationCurve::EaseOut);
        assert_eq!(defaults.template(resize).curve(), AnimationCurve::EaseOut);
    }

    #[test]
    fn test_frame_step() {
        let timeline = TimelineConfig { frame_rate: 50 };
        assert!((timeline.frame_step() - 0.02).abs() < 1e-6);
        assert_eq!(TimelineConfig { frame_rate: 0 }.frame_step(), 1.0);
    }
}
