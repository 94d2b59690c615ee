use crate::math;

/// 位置と回転のスナップショット
///
/// デバイスの生ポーズにもIKアンカーの出力にも使う。
/// 座標系: Y上、前方+Z、回転はクォータニオン (x, y, z, w)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// 位置 (x, y, z) メートル
    pub position: [f32; 3],
    /// 回転 (クォータニオン: x, y, z, w)
    pub rotation: [f32; 4],
}

impl Pose {
    pub fn new(position: [f32; 3], rotation: [f32; 4]) -> Self {
        Self { position, rotation }
    }

    /// 原点、回転なし
    pub fn identity() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0, 1.0],
        }
    }

    /// ワールド座標系での前方ベクトル
    pub fn forward(&self) -> [f32; 3] {
        math::rotate_vector(&self.rotation, &[0.0, 0.0, 1.0])
    }
}

/// 1フレーム分のトラッキングデバイスのスナップショット
///
/// 外部のデバイス抽象層がフレーム毎にサンプリングする。
/// 未接続・未検出のデバイスはNone（エラーではない）。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// ヘッドセット
    pub head: Option<Pose>,
    /// 左手コントローラー
    pub left_hand: Option<Pose>,
    /// 右手コントローラー
    pub right_hand: Option<Pose>,
    /// 高さ基準デバイス（通常はVRカメラ）
    pub height_reference: Option<Pose>,
}
