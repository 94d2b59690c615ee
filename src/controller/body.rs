use serde::Deserialize;

use crate::config::ControllerConfig;
use crate::controller::mapping::TrackingTarget;
use crate::math;
use crate::pose::{FrameInput, Pose};

/// アバターアセットの基準身長（メートル）
pub const REFERENCE_HEIGHT: f32 = 1.8;

/// トラッキング戦略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingMode {
    /// 頭の位置からルートを推定し、体全体を動かす
    FullBody,
    /// 頭と両手のアンカーだけを1:1で動かす（ルートは固定）
    #[default]
    HalfBody,
}

/// アバターのルートトランスフォーム
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootTransform {
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    /// 三軸均一スケール
    pub scale: f32,
}

impl RootTransform {
    pub fn identity() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: 1.0,
        }
    }
}

/// 外部のIKソルバーが消費するアンカーポーズ
///
/// マッピングがスキップされたフレームでは前回の値を保持する。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AvatarAnchors {
    pub head: Option<Pose>,
    pub left_hand: Option<Pose>,
    pub right_hand: Option<Pose>,
}

/// ボディトラッキングコントローラー
///
/// フレーム毎にデバイスポーズを読み、ルートトランスフォーム・
/// 3つのIKアンカー・移動速度を更新する。
/// デバイスやマッピングの欠落は各フレームで黙ってスキップする（エラーなし）。
pub struct AvatarController {
    mode: TrackingMode,
    head: Option<TrackingTarget>,
    left_hand: Option<TrackingTarget>,
    right_hand: Option<TrackingTarget>,
    /// 体の回転の追従レート（1/秒、大きいほど機敏）
    turn_smoothness: f32,
    /// 頭アンカー → ルート位置のオフセット
    head_body_offset: [f32; 3],
    use_height_reference: bool,

    root: RootTransform,
    anchors: AvatarAnchors,
    /// 平滑化の継続用に保持する前回の体の回転
    last_rotation: [f32; 4],
    /// 速度算出用に保持する前回のルート位置
    last_position: [f32; 3],
    /// アニメーション用の移動速度（メートル/秒）
    speed: f32,
}

impl AvatarController {
    pub fn from_config(config: &ControllerConfig) -> Self {
        let root = RootTransform::identity();
        let mut controller = Self {
            mode: config.mode,
            head: config.head.as_ref().map(TrackingTarget::from_config),
            left_hand: config.left_hand.as_ref().map(TrackingTarget::from_config),
            right_hand: config.right_hand.as_ref().map(TrackingTarget::from_config),
            turn_smoothness: config.turn_smoothness,
            head_body_offset: config.head_body_offset,
            use_height_reference: config.use_height_reference,
            root,
            anchors: AvatarAnchors::default(),
            last_rotation: root.rotation,
            last_position: root.position,
            speed: 0.0,
        };
        controller.adjust_scale(config.player_height);
        controller
    }

    /// ルートの初期ポーズを設定し、平滑化・速度のシード値も取り直す
    pub fn with_root_pose(mut self, position: [f32; 3], rotation: [f32; 4]) -> Self {
        self.root.position = position;
        self.root.rotation = rotation;
        self.last_rotation = rotation;
        self.last_position = position;
        self
    }

    /// プレイヤー身長に合わせた均一スケール
    /// 0以下は「指定なし」として現在値を維持する
    fn adjust_scale(&mut self, player_height: f32) {
        if player_height <= 0.0 {
            return;
        }
        self.root.scale = player_height / REFERENCE_HEIGHT;
    }

    /// フレーム毎の更新。デバイスのサンプリング後、IKソルバーの前に呼ぶ
    pub fn update(&mut self, input: &FrameInput, dt: f32) {
        match self.mode {
            TrackingMode::FullBody => self.update_full_body(input, dt),
            TrackingMode::HalfBody => self.update_half_body(input),
        }
    }

    fn update_full_body(&mut self, input: &FrameInput, dt: f32) {
        // 頭アンカーを先に計算し、今フレームの値でルートを置く
        let head_anchor = match (&self.head, &input.head) {
            (Some(target), Some(device)) => Some(target.apply(device)),
            _ => None,
        };

        if let Some(ref anchor) = head_anchor {
            let mut target_position = [
                anchor.position[0] + self.head_body_offset[0],
                anchor.position[1] + self.head_body_offset[1],
                anchor.position[2] + self.head_body_offset[2],
            ];
            // 垂直成分は高さ基準デバイスを優先（足の接地を安定させる）
            if self.use_height_reference {
                if let Some(ref reference) = input.height_reference {
                    target_position[1] = reference.position[1];
                }
            }
            self.root.position = target_position;
        }

        // 体の向き: 頭の前方を水平面に射影したヨーのみの回転へ平滑に追従
        if let Some(ref device) = input.head {
            if let Some(target_rotation) = math::look_rotation_flat(&device.forward()) {
                let t = math::clamp01(self.turn_smoothness * dt);
                self.last_rotation = math::slerp(&self.last_rotation, &target_rotation, t);
            }
            // 射影が縮退したフレームは前回の回転を保持
            self.root.rotation = self.last_rotation;
        }

        if let Some(anchor) = head_anchor {
            self.anchors.head = Some(anchor);
        }
        if let (Some(target), Some(device)) = (&self.left_hand, &input.left_hand) {
            self.anchors.left_hand = Some(target.apply(device));
        }
        if let (Some(target), Some(device)) = (&self.right_hand, &input.right_hand) {
            self.anchors.right_hand = Some(target.apply(device));
        }

        // 移動速度。dt=0のフレームは前回値を保持（ゼロ除算回避）
        if dt > 0.0 {
            self.speed = math::distance(&self.root.position, &self.last_position) / dt;
        }
        self.last_position = self.root.position;
    }

    fn update_half_body(&mut self, input: &FrameInput) {
        // ルートは動かさず、アンカーをデバイスポーズで1:1に動かす
        if self.head.is_some() {
            if let Some(ref device) = input.head {
                self.anchors.head = Some(TrackingTarget::direct(device));
            }
        }
        if self.left_hand.is_some() {
            if let Some(ref device) = input.left_hand {
                self.anchors.left_hand = Some(TrackingTarget::direct(device));
            }
        }
        if self.right_hand.is_some() {
            if let Some(ref device) = input.right_hand {
                self.anchors.right_hand = Some(TrackingTarget::direct(device));
            }
        }

        // 頭の高さだけは高さ基準デバイスに合わせる
        if self.use_height_reference {
            if let (Some(anchor), Some(reference)) =
                (self.anchors.head.as_mut(), input.height_reference.as_ref())
            {
                anchor.position[1] = reference.position[1];
            }
        }
    }

    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    pub fn root(&self) -> &RootTransform {
        &self.root
    }

    pub fn anchors(&self) -> &AvatarAnchors {
        &self.anchors
    }

    /// アニメーション用の移動速度（メートル/秒、フルボディモードのみ更新）
    pub fn speed(&self) -> f32 {
        self.speed
    }
}
