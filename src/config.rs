use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::controller::TrackingMode;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub vmt: VmtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// デモループの目標フレームレート
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ControllerConfig {
    /// トラッキングモード ("full_body" / "half_body")
    #[serde(default)]
    pub mode: TrackingMode,
    /// プレイヤーの身長（メートル）。0以下でスケール調整をスキップ
    #[serde(default = "default_player_height")]
    pub player_height: f32,
    /// フルボディモードの体の回転の追従速度（大きいほど機敏）
    #[serde(default = "default_turn_smoothness")]
    pub turn_smoothness: f32,
    /// 頭アンカーから体のルートへのオフセット（メートル）
    #[serde(default)]
    pub head_body_offset: [f32; 3],
    /// 高さ基準デバイス（VRカメラ）で垂直位置を補正するか
    #[serde(default = "default_use_height_reference")]
    pub use_height_reference: bool,
    /// 頭のマッピング。省略時はオフセットなしで有効
    #[serde(default = "default_target")]
    pub head: Option<TargetConfig>,
    /// 左手のマッピング
    #[serde(default = "default_target")]
    pub left_hand: Option<TargetConfig>,
    /// 右手のマッピング
    #[serde(default = "default_target")]
    pub right_hand: Option<TargetConfig>,
}

/// デバイスとIKアンカーの対応付け設定
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TargetConfig {
    /// 位置オフセット（デバイスローカル座標、メートル）
    #[serde(default)]
    pub position_offset: [f32; 3],
    /// 回転オフセット（オイラー角、度数法）
    #[serde(default)]
    pub rotation_offset: [f32; 3],
}

#[derive(Debug, Deserialize, Clone)]
pub struct VmtConfig {
    /// VMT送信先アドレス
    #[serde(default = "default_vmt_addr")]
    pub addr: String,
}

fn default_target_fps() -> u32 { 90 }
fn default_player_height() -> f32 { 1.8 }
fn default_turn_smoothness() -> f32 { 5.0 }
fn default_use_height_reference() -> bool { true }
fn default_target() -> Option<TargetConfig> { Some(TargetConfig::default()) }
fn default_vmt_addr() -> String { "127.0.0.1:39570".to_string() }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_fps: default_target_fps(),
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            mode: TrackingMode::default(),
            player_height: default_player_height(),
            turn_smoothness: default_turn_smoothness(),
            head_body_offset: [0.0, 0.0, 0.0],
            use_height_reference: default_use_height_reference(),
            head: default_target(),
            left_hand: default_target(),
            right_hand: default_target(),
        }
    }
}

impl Default for VmtConfig {
    fn default() -> Self {
        Self {
            addr: default_vmt_addr(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 設定ファイルがない・壊れている場合はデフォルト値で続行
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }
}
