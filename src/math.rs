//! クォータニオン・ベクトル演算ヘルパー
//!
//! 回転は (x, y, z, w) の単位クォータニオン、座標系はY上・前方+Z。

/// 水平射影の縮退判定に使う閾値
const FLAT_EPSILON: f32 = 1e-6;

/// 0.0〜1.0にクランプ
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// 2点間の距離
pub fn distance(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// クォータニオン積 a * b（bを先に適用、aを後に適用）
pub fn quat_mul(a: &[f32; 4], b: &[f32; 4]) -> [f32; 4] {
    [
        a[3] * b[0] + a[0] * b[3] + a[1] * b[2] - a[2] * b[1],
        a[3] * b[1] - a[0] * b[2] + a[1] * b[3] + a[2] * b[0],
        a[3] * b[2] + a[0] * b[1] - a[1] * b[0] + a[2] * b[3],
        a[3] * b[3] - a[0] * b[0] - a[1] * b[1] - a[2] * b[2],
    ]
}

/// クォータニオンを正規化（長さ0なら恒等回転を返す）
pub fn normalize(q: &[f32; 4]) -> [f32; 4] {
    let len = (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt();
    if len > 0.0 {
        [q[0] / len, q[1] / len, q[2] / len, q[3] / len]
    } else {
        [0.0, 0.0, 0.0, 1.0]
    }
}

/// ベクトルをクォータニオンで回転
/// v' = v + 2 * cross(q.xyz, cross(q.xyz, v) + w * v)
pub fn rotate_vector(q: &[f32; 4], v: &[f32; 3]) -> [f32; 3] {
    let qv = [q[0], q[1], q[2]];
    let t = cross(&qv, v);
    let t = [t[0] + q[3] * v[0], t[1] + q[3] * v[1], t[2] + q[3] * v[2]];
    let c = cross(&qv, &t);
    [
        v[0] + 2.0 * c[0],
        v[1] + 2.0 * c[1],
        v[2] + 2.0 * c[2],
    ]
}

/// デバイスローカル座標の点をワールド座標へ変換
/// position + rotation * local
pub fn transform_point(position: &[f32; 3], rotation: &[f32; 4], local: &[f32; 3]) -> [f32; 3] {
    let rotated = rotate_vector(rotation, local);
    [
        position[0] + rotated[0],
        position[1] + rotated[1],
        position[2] + rotated[2],
    ]
}

/// オイラー角（度数法）からクォータニオンを生成
/// 適用順序: Z → X → Y（q = qy * qx * qz）
pub fn euler_to_quaternion(degrees: &[f32; 3]) -> [f32; 4] {
    let (sx, cx) = (degrees[0].to_radians() / 2.0).sin_cos();
    let (sy, cy) = (degrees[1].to_radians() / 2.0).sin_cos();
    let (sz, cz) = (degrees[2].to_radians() / 2.0).sin_cos();

    let qx = [sx, 0.0, 0.0, cx];
    let qy = [0.0, sy, 0.0, cy];
    let qz = [0.0, 0.0, sz, cz];

    quat_mul(&qy, &quat_mul(&qx, &qz))
}

/// 球面線形補間（shortest path）
///
/// 2つの回転がほぼ一致する場合はNLERPにフォールバックする。
/// t=0でa、t=1でbを返す。結果は単位クォータニオン。
pub fn slerp(a: &[f32; 4], b: &[f32; 4], t: f32) -> [f32; 4] {
    let mut b = *b;
    let mut dot = a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3];

    // shortest path: dot < 0 なら反転
    if dot < 0.0 {
        b = [-b[0], -b[1], -b[2], -b[3]];
        dot = -dot;
    }

    // ほぼ同一回転: sin(theta)が0に近くNLERPで十分
    if dot > 0.9995 {
        let result = [
            (1.0 - t) * a[0] + t * b[0],
            (1.0 - t) * a[1] + t * b[1],
            (1.0 - t) * a[2] + t * b[2],
            (1.0 - t) * a[3] + t * b[3],
        ];
        return normalize(&result);
    }

    let theta = dot.clamp(-1.0, 1.0).acos();
    let sin_theta = theta.sin();
    let wa = ((1.0 - t) * theta).sin() / sin_theta;
    let wb = (t * theta).sin() / sin_theta;

    [
        wa * a[0] + wb * b[0],
        wa * a[1] + wb * b[1],
        wa * a[2] + wb * b[2],
        wa * a[3] + wb * b[3],
    ]
}

/// 前方ベクトルを水平面に射影し、ヨーのみの回転を作る
///
/// 射影が縮退している（前方が鉛直に平行）場合はNone。
/// ヘッドのピッチ・ロールには追従しない。
pub fn look_rotation_flat(forward: &[f32; 3]) -> Option<[f32; 4]> {
    let fx = forward[0];
    let fz = forward[2];
    if (fx * fx + fz * fz).sqrt() < FLAT_EPSILON {
        return None;
    }

    let yaw = f32::atan2(fx, fz);
    let half = yaw / 2.0;
    Some([0.0, half.sin(), 0.0, half.cos()])
}

fn cross(a: &[f32; 3], b: &[f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}
