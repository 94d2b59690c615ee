use crate::controller::body::AvatarAnchors;

/// 頭アンカーのマーカー色 (RGB)
pub const HEAD_MARKER_COLOR: u32 = 0x0000FF; // 青

/// 左手アンカーのマーカー色 (RGB)
pub const LEFT_HAND_MARKER_COLOR: u32 = 0x00FF00; // 緑

/// 右手アンカーのマーカー色 (RGB)
pub const RIGHT_HAND_MARKER_COLOR: u32 = 0xFF0000; // 赤

/// マーカー半径（メートル）
pub const MARKER_RADIUS: f32 = 0.05;

/// IKアンカー可視化用のマーカー
///
/// 外部のレンダラーがデバッグ表示に使う。状態には影響しない。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: [f32; 3],
    pub color: u32,
    pub radius: f32,
}

/// 有効なアンカーごとにマーカーを1つ返す
pub fn anchor_markers(anchors: &AvatarAnchors) -> Vec<Marker> {
    let mut markers = Vec::with_capacity(3);
    if let Some(ref head) = anchors.head {
        markers.push(Marker {
            position: head.position,
            color: HEAD_MARKER_COLOR,
            radius: MARKER_RADIUS,
        });
    }
    if let Some(ref left) = anchors.left_hand {
        markers.push(Marker {
            position: left.position,
            color: LEFT_HAND_MARKER_COLOR,
            radius: MARKER_RADIUS,
        });
    }
    if let Some(ref right) = anchors.right_hand {
        markers.push(Marker {
            position: right.position,
            color: RIGHT_HAND_MARKER_COLOR,
            radius: MARKER_RADIUS,
        });
    }
    markers
}
