//! # Environment 模块
//!
//! 显式传递的运行环境（屏幕尺寸、缩放比例），取代全局的"当前屏幕"查询。

use crate::config::ScreenConfig;
use crate::geometry::{Point, Rect, Size};

/// 运行环境
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    /// 屏幕尺寸（逻辑像素）
    pub screen: Size,
    /// 屏幕缩放比例
    pub scale: f32,
}

impl Default for Environment {
    fn default() -> Self {
        Self::from(&ScreenConfig::default())
    }
}

impl Environment {
    /// 以 1.0 缩放创建环境
    pub fn new(screen: Size) -> Self {
        Self { screen, scale: 1.0 }
    }

    /// 设置缩放比例
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// 屏幕边界
    pub fn screen_bounds(&self) -> Rect {
        Rect::screen(self)
    }

    /// 屏幕中心
    pub fn screen_center(&self) -> Point {
        self.screen_bounds().center()
    }
}

impl From<&ScreenConfig> for Environment {
    fn from(config: &ScreenConfig) -> Self {
        Self {
            screen: Size::new(config.width, config.height),
            scale: config.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_center() {
        let env = Environment::new(Size::new(400.0, 800.0));
        assert_eq!(env.screen_center(), Point::new(200.0, 400.0));
    }

    #[test]
    fn test_from_screen_config() {
        let config = ScreenConfig {
            width: 1280.0,
            height: 720.0,
            scale: 2.0,
        };
        let env = Environment::from(&config);
        assert_eq!(env.screen, Size::new(1280.0, 720.0));
        assert_eq!(env.scale, 2.0);
    }
}
