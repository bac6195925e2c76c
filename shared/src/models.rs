use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::date::activity_time;

// =========================================================
// 标识符 (Identifiers)
// =========================================================

pub type UserId = i64;
pub type PeerId = i64;
pub type AclId = i64;

/// 系统设置：键到值的映射
pub type SettingsMap = BTreeMap<String, String>;

// =========================================================
// 通用响应 (Acknowledgements)
// =========================================================

/// 只携带提示消息的响应
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub msg: String,
}

/// 会触发 WireGuard/防火墙同步的写操作响应
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncAck {
    #[serde(default)]
    pub msg: String,
    /// 控制器是否成功把变更同步到 wg0 与 iptables
    #[serde(default)]
    pub sync_success: Option<bool>,
}

// =========================================================
// 认证 (Auth)
// =========================================================

/// 登录表单（urlencoded）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub new_password: String,
}

// =========================================================
// 用户 (Users)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

/// 创建/更新用户的请求体，未设置的字段不会发送
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// =========================================================
// 节点 (Peers)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peer {
    pub id: PeerId,
    pub public_key: String,
    /// 服务端 AllowedIPs
    #[serde(default)]
    pub allowed_ips: String,
    /// 客户端 AllowedIPs
    #[serde(default)]
    pub client_allowed_ips: String,
    #[serde(default)]
    pub remark: Option<String>,
    /// 数据库列可为空，空值按停用处理
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: bool,
    pub peer_ip: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub keepalive: Option<u32>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 新建节点的请求体
///
/// 密钥与 peer_ip 由控制器分配，keepalive 会被控制器限制在 30~120 秒。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPeer {
    pub remark: String,
    pub status: bool,
    pub allowed_ips: String,
    pub client_allowed_ips: String,
    pub keepalive: u32,
}

impl Default for NewPeer {
    fn default() -> Self {
        Self {
            remark: String::new(),
            status: true,
            allowed_ips: String::new(),
            client_allowed_ips: "0.0.0.0/0".to_string(),
            keepalive: 30,
        }
    }
}

/// 编辑节点的请求体，仅发送设置了的字段
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_ips: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_allowed_ips: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keepalive: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerCreated {
    #[serde(default)]
    pub msg: String,
    pub public_key: String,
    pub peer_ip: String,
    #[serde(default)]
    pub sync_success: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerToggled {
    #[serde(default)]
    pub msg: String,
    pub status: bool,
    #[serde(default)]
    pub sync_success: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedKey {
    pub public_key: String,
    pub private_key: String,
    #[serde(default)]
    pub encrypted_private_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableIp {
    pub peer_ip: String,
}

/// 最近 10 分钟内有握手的节点数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineNodes {
    pub wg_online_nodes_count: u64,
}

// =========================================================
// 防火墙规则 (ACLs)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    Firewall,
    Nat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AclAction {
    Allow,
    Deny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
    #[default]
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acl {
    pub id: AclId,
    /// `None` 表示全局规则
    #[serde(default)]
    pub peer_id: Option<PeerId>,
    #[serde(default)]
    pub rule_type: Option<RuleType>,
    pub action: AclAction,
    pub target: String,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub source_interface: Option<String>,
    #[serde(default)]
    pub destination_interface: Option<String>,
    #[serde(default)]
    pub port: String,
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub direction: Direction,
    pub enabled: bool,
}

/// 创建/编辑 ACL 的请求体
///
/// 编辑时未设置的字段保持不变；`peer_id` 取 [`crate::GLOBAL_ACL_PEER_ID`] 表示全局规则。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AclPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<RuleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_id: Option<PeerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<AclAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_interface: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_interface: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

// =========================================================
// 批量操作 (Batch)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchPeers {
    pub peers: Vec<NewPeer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchAcls {
    pub acls: Vec<AclPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItemResult {
    pub index: usize,
    pub success: bool,
    #[serde(default)]
    pub peer_ip: Option<String>,
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCreated {
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub results: Vec<BatchItemResult>,
    #[serde(default)]
    pub sync_success: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUpdated {
    #[serde(default)]
    pub msg: String,
    pub updated_count: u64,
    #[serde(default)]
    pub sync_success: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchDeleted {
    #[serde(default)]
    pub msg: String,
    pub deleted_count: u64,
    #[serde(default)]
    pub sync_success: Option<bool>,
}

// =========================================================
// 系统 (System)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageStat {
    pub total: u64,
    pub used: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkRate {
    pub bytes_sent_per_s: f64,
    pub bytes_recv_per_s: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    pub cpu_percent: f64,
    pub memory: UsageStat,
    pub disk: UsageStat,
    pub network: NetworkRate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    /// info / success / warning
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(with = "activity_time")]
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingValue {
    #[serde(default)]
    pub value: String,
}

// =========================================================
// 备份 (Backup)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    #[serde(default)]
    pub msg: String,
    pub imported_peers: u64,
    pub imported_acls: u64,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub sync_success: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupStatus {
    pub peer_count: u64,
    pub acl_count: u64,
    pub activity_count: u64,
    #[serde(default)]
    pub last_backup_time: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn peer_with_null_status_is_disabled() {
        let raw = json!([
            {"id": 1, "public_key": "a=", "status": null, "peer_ip": "10.0.0.2"},
            {"id": 2, "public_key": "b=", "status": true, "peer_ip": "10.0.0.3"},
            {"id": 3, "public_key": "c=", "peer_ip": "10.0.0.4"}
        ]);
        let peers: Vec<Peer> = serde_json::from_value(raw).unwrap();
        assert_eq!(
            peers.iter().map(|p| p.status).collect::<Vec<_>>(),
            [false, true, false]
        );
    }

    #[test]
    fn peer_from_controller_listing() {
        let raw = json!({
            "id": 3,
            "public_key": "pk=",
            "allowed_ips": "10.0.0.3/32",
            "client_allowed_ips": "0.0.0.0/0",
            "remark": null,
            "status": true,
            "peer_ip": "10.0.0.3",
            "created_at": "2024-05-01T08:00:00.123456",
            "keepalive": 30
        });
        let peer: Peer = serde_json::from_value(raw).unwrap();
        assert_eq!(peer.id, 3);
        assert_eq!(peer.remark, None);
        assert!(peer.created_at.is_some());
    }

    #[test]
    fn global_acl_has_no_peer() {
        let raw = json!({
            "id": 1,
            "peer_id": null,
            "rule_type": "firewall",
            "action": "deny",
            "target": "192.168.1.0/24",
            "destination": null,
            "source_interface": null,
            "destination_interface": null,
            "port": "22",
            "protocol": "tcp",
            "direction": "inbound",
            "enabled": false
        });
        let acl: Acl = serde_json::from_value(raw).unwrap();
        assert_eq!(acl.peer_id, None);
        assert_eq!(acl.action, AclAction::Deny);
        assert_eq!(acl.direction, Direction::Inbound);
    }

    #[test]
    fn partial_payloads_skip_unset_fields() {
        let update = PeerUpdate {
            remark: Some("laptop".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"remark": "laptop"}));

        let acl = AclPayload {
            peer_id: Some(crate::GLOBAL_ACL_PEER_ID),
            action: Some(AclAction::Allow),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&acl).unwrap(),
            json!({"peer_id": -1, "action": "allow"})
        );
    }

    #[test]
    fn activity_uses_type_field() {
        let raw = json!({
            "id": 9,
            "type": "warning",
            "message": "删除 节点: 4 及其相关规则",
            "timestamp": "2024-05-01 08:00:00"
        });
        let activity: Activity = serde_json::from_value(raw).unwrap();
        assert_eq!(activity.kind, "warning");
        let back = serde_json::to_value(&activity).unwrap();
        assert_eq!(back["timestamp"], "2024-05-01 08:00:00");
    }
}
