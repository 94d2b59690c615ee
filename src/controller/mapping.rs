use crate::config::TargetConfig;
use crate::math;
use crate::pose::Pose;

/// トラッキングデバイスとIKアンカーの対応付け
///
/// デバイスローカル座標系で表現した固定オフセットを持つ。
/// オフセットは構築時に確定し、実行中は変化しない。
pub struct TrackingTarget {
    /// 位置オフセット（デバイスローカル座標、メートル）
    position_offset: [f32; 3],
    /// 回転オフセット（構築時にオイラー角・度数法から変換済み）
    rotation_offset: [f32; 4],
}

impl TrackingTarget {
    pub fn new(position_offset: [f32; 3], rotation_offset_deg: [f32; 3]) -> Self {
        Self {
            position_offset,
            rotation_offset: math::euler_to_quaternion(&rotation_offset_deg),
        }
    }

    /// 設定から作成
    pub fn from_config(config: &TargetConfig) -> Self {
        Self::new(config.position_offset, config.rotation_offset)
    }

    /// オフセット付きマッピング（フルボディモード）
    ///
    /// 位置: オフセットをデバイスの現在ポーズでワールド座標へ変換
    /// 回転: デバイス回転の後にオフセット回転を適用
    pub fn apply(&self, device: &Pose) -> Pose {
        Pose::new(
            math::transform_point(&device.position, &device.rotation, &self.position_offset),
            math::quat_mul(&device.rotation, &self.rotation_offset),
        )
    }

    /// デバイスのポーズをそのまま返す（ハーフボディモード）
    pub fn direct(device: &Pose) -> Pose {
        *device
    }
}

impl Default for TrackingTarget {
    fn default() -> Self {
        Self::new([0.0, 0.0, 0.0], [0.0, 0.0, 0.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq_3(a: &[f32; 3], b: &[f32; 3], eps: f32) -> bool {
        (a[0] - b[0]).abs() < eps && (a[1] - b[1]).abs() < eps && (a[2] - b[2]).abs() < eps
    }

    #[test]
    fn test_apply_position_offset() {
        // デバイス位置(1,0,0)・回転なし、オフセット(0,0,1) → (1,0,1)
        let target = TrackingTarget::new([0.0, 0.0, 1.0], [0.0, 0.0, 0.0]);
        let device = Pose::new([1.0, 0.0, 0.0], [0.0, 0.0, 0.0, 1.0]);
        let result = target.apply(&device);
        assert!(
            approx_eq_3(&result.position, &[1.0, 0.0, 1.0], 1e-6),
            "got {:?}",
            result.position
        );
        assert_eq!(result.rotation, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_apply_offset_follows_device_rotation() {
        // デバイスがヨー90度: ローカル(0,0,1)はワールド+X方向に出る
        let target = TrackingTarget::new([0.0, 0.0, 1.0], [0.0, 0.0, 0.0]);
        let half = std::f32::consts::FRAC_PI_4;
        let device = Pose::new([0.0, 1.0, 0.0], [0.0, half.sin(), 0.0, half.cos()]);
        let result = target.apply(&device);
        assert!(
            approx_eq_3(&result.position, &[1.0, 1.0, 0.0], 1e-5),
            "got {:?}",
            result.position
        );
    }

    #[test]
    fn test_apply_rotation_offset_composes_after_device() {
        // デバイスのヨー30度 + オフセットのヨー60度 = ヨー90度
        let target = TrackingTarget::new([0.0, 0.0, 0.0], [0.0, 60.0, 0.0]);
        let half30 = 15.0_f32.to_radians();
        let device = Pose::new([0.0, 0.0, 0.0], [0.0, half30.sin(), 0.0, half30.cos()]);
        let result = target.apply(&device);

        let half90 = 45.0_f32.to_radians();
        let expected = [0.0, half90.sin(), 0.0, half90.cos()];
        for i in 0..4 {
            assert!(
                (result.rotation[i] - expected[i]).abs() < 1e-5,
                "component {}: got {}, expected {}",
                i,
                result.rotation[i],
                expected[i]
            );
        }
    }

    #[test]
    fn test_direct_passthrough() {
        let half = std::f32::consts::FRAC_PI_4;
        let device = Pose::new([1.0, 2.0, 3.0], [0.0, half.sin(), 0.0, half.cos()]);
        let result = TrackingTarget::direct(&device);
        assert_eq!(result, device);
    }

    #[test]
    fn test_zero_offsets_equal_direct() {
        let target = TrackingTarget::default();
        let device = Pose::new([0.5, 1.5, -0.5], [0.0, 0.0, 0.0, 1.0]);
        let mapped = target.apply(&device);
        assert_eq!(mapped, TrackingTarget::direct(&device));
    }
}
