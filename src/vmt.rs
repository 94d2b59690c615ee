use anyhow::Result;
use rosc::{encoder, OscMessage, OscPacket, OscType};
use std::net::UdpSocket;

use crate::controller::{AvatarAnchors, RootTransform};
use crate::pose::Pose;

/// VMTのデフォルトアドレス
pub const VMT_DEFAULT_ADDR: &str = "127.0.0.1:39570";

/// アンカー送信用のトラッカー番号
pub const HEAD_INDEX: i32 = 0;
pub const LEFT_HAND_INDEX: i32 = 1;
pub const RIGHT_HAND_INDEX: i32 = 2;
pub const ROOT_INDEX: i32 = 3;

/// VMTへ送信するOSCメッセージを構築
/// 引数: index, enable, timeoffset, x, y, z, qx, qy, qz, qw
/// enable: 0=無効, 1=トラッカー
pub fn build_osc_message(index: i32, enable: i32, pose: &Pose) -> OscMessage {
    OscMessage {
        addr: "/VMT/Room/Unity".to_string(),
        args: vec![
            OscType::Int(index),
            OscType::Int(enable),
            OscType::Float(0.0), // timeoffset
            OscType::Float(pose.position[0]),
            OscType::Float(pose.position[1]),
            OscType::Float(pose.position[2]),
            OscType::Float(pose.rotation[0]),
            OscType::Float(pose.rotation[1]),
            OscType::Float(pose.rotation[2]),
            OscType::Float(pose.rotation[3]),
        ],
    }
}

/// OSCメッセージをバイト列にエンコード
pub fn encode_osc_message(msg: &OscMessage) -> Result<Vec<u8>> {
    let packet = OscPacket::Message(msg.clone());
    let encoded = encoder::encode(&packet)?;
    Ok(encoded)
}

/// IKアンカーを仮想トラッカーとして配信するVMTクライアント
pub struct VmtClient {
    socket: UdpSocket,
    target_addr: String,
}

impl VmtClient {
    /// 新しいVMTクライアントを作成
    pub fn new(target_addr: &str) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        Ok(Self {
            socket,
            target_addr: target_addr.to_string(),
        })
    }

    /// デフォルトアドレス(127.0.0.1:39570)で作成
    pub fn default() -> Result<Self> {
        Self::new(VMT_DEFAULT_ADDR)
    }

    /// 単一トラッカーの位置・回転を送信
    pub fn send(&self, index: i32, enable: i32, pose: &Pose) -> Result<()> {
        let msg = build_osc_message(index, enable, pose);
        let data = encode_osc_message(&msg)?;
        self.socket.send_to(&data, &self.target_addr)?;
        Ok(())
    }

    /// 3つのIKアンカーを送信。欠落中のアンカーは無効化して送る
    pub fn send_anchors(&self, anchors: &AvatarAnchors) -> Result<()> {
        let slots = [
            (HEAD_INDEX, anchors.head),
            (LEFT_HAND_INDEX, anchors.left_hand),
            (RIGHT_HAND_INDEX, anchors.right_hand),
        ];
        for (index, anchor) in slots {
            match anchor {
                Some(pose) => self.send(index, 1, &pose)?,
                None => self.send(index, 0, &Pose::identity())?,
            }
        }
        Ok(())
    }

    /// アバターのルートトランスフォームを送信（フルボディモード）
    pub fn send_root(&self, root: &RootTransform) -> Result<()> {
        let pose = Pose::new(root.position, root.rotation);
        self.send(ROOT_INDEX, 1, &pose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_osc_message_address() {
        let pose = Pose::identity();
        let msg = build_osc_message(HEAD_INDEX, 1, &pose);
        assert_eq!(msg.addr, "/VMT/Room/Unity");
    }

    #[test]
    fn test_build_osc_message_args() {
        let pose = Pose::new([1.0, 2.0, 3.0], [0.0, 0.0, 0.0, 1.0]);
        let msg = build_osc_message(LEFT_HAND_INDEX, 1, &pose);

        // 引数: index, enable, timeoffset, x, y, z, qx, qy, qz, qw
        assert_eq!(msg.args.len(), 10);

        assert_eq!(msg.args[0], OscType::Int(LEFT_HAND_INDEX));
        assert_eq!(msg.args[1], OscType::Int(1));
        assert_eq!(msg.args[2], OscType::Float(0.0));
        // position
        assert_eq!(msg.args[3], OscType::Float(1.0));
        assert_eq!(msg.args[4], OscType::Float(2.0));
        assert_eq!(msg.args[5], OscType::Float(3.0));
        // rotation (quaternion)
        assert_eq!(msg.args[6], OscType::Float(0.0));
        assert_eq!(msg.args[7], OscType::Float(0.0));
        assert_eq!(msg.args[8], OscType::Float(0.0));
        assert_eq!(msg.args[9], OscType::Float(1.0));
    }

    #[test]
    fn test_build_osc_message_disabled() {
        let pose = Pose::identity();
        let msg = build_osc_message(RIGHT_HAND_INDEX, 0, &pose);
        assert_eq!(msg.args[1], OscType::Int(0));
    }

    #[test]
    fn test_anchor_indices_distinct() {
        let indices = [HEAD_INDEX, LEFT_HAND_INDEX, RIGHT_HAND_INDEX, ROOT_INDEX];
        for (i, a) in indices.iter().enumerate() {
            for b in indices.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_encode_osc_message() {
        let pose = Pose::identity();
        let msg = build_osc_message(HEAD_INDEX, 1, &pose);
        let encoded = encode_osc_message(&msg).unwrap();
        assert!(!encoded.is_empty());
    }
}
