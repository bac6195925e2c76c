//! 具名端点 (Named Endpoint Groups)
//!
//! 每个函数对应控制器的一个逻辑操作，只负责构造请求描述符：
//! 不校验参数、不发请求、不做分支（路径与查询串拼接除外）。

use crate::models::*;
use crate::protocol::{Download, Endpoint, InvalidBody, RequestDescriptor};

pub mod auth {
    use super::*;

    /// `POST /login`，表单提交
    pub fn login(credentials: &Credentials) -> Endpoint<LoginResponse> {
        Endpoint::new(RequestDescriptor::post("/login").with_form([
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ]))
    }

    pub fn change_password(new_password: &str) -> Result<Endpoint<Ack>, InvalidBody> {
        let body = ChangePasswordRequest {
            new_password: new_password.to_string(),
        };
        Ok(Endpoint::new(
            RequestDescriptor::post("/change-password").with_json(&body)?,
        ))
    }
}

pub mod users {
    use super::*;

    pub fn list() -> Endpoint<Vec<User>> {
        Endpoint::new(RequestDescriptor::get("/users"))
    }

    pub fn create(user: &UserPayload) -> Result<Endpoint<serde_json::Value>, InvalidBody> {
        Ok(Endpoint::new(RequestDescriptor::post("/users").with_json(user)?))
    }

    pub fn update(id: UserId, user: &UserPayload) -> Result<Endpoint<serde_json::Value>, InvalidBody> {
        Ok(Endpoint::new(
            RequestDescriptor::put(format!("/users/{id}")).with_json(user)?,
        ))
    }

    pub fn delete(id: UserId) -> Endpoint<serde_json::Value> {
        Endpoint::new(RequestDescriptor::delete(format!("/users/{id}")))
    }
}

pub mod peers {
    use super::*;

    pub fn list() -> Endpoint<Vec<Peer>> {
        Endpoint::new(RequestDescriptor::get("/peers"))
    }

    pub fn available_ip() -> Endpoint<AvailableIp> {
        Endpoint::new(RequestDescriptor::get("/peers/available-ip"))
    }

    pub fn online_nodes_count() -> Endpoint<OnlineNodes> {
        Endpoint::new(RequestDescriptor::get("/wg/online-nodes-count"))
    }

    pub fn create(peer: &NewPeer) -> Result<Endpoint<PeerCreated>, InvalidBody> {
        Ok(Endpoint::new(RequestDescriptor::post("/peers").with_json(peer)?))
    }

    pub fn update(id: PeerId, update: &PeerUpdate) -> Result<Endpoint<SyncAck>, InvalidBody> {
        Ok(Endpoint::new(
            RequestDescriptor::put(format!("/peers/{id}")).with_json(update)?,
        ))
    }

    /// 控制器会级联删除该节点的 ACL
    pub fn delete(id: PeerId) -> Endpoint<Ack> {
        Endpoint::new(RequestDescriptor::delete(format!("/peers/{id}")))
    }

    pub fn toggle(id: PeerId) -> Endpoint<PeerToggled> {
        Endpoint::new(RequestDescriptor::post(format!("/peers/{id}/toggle")))
    }

    pub fn generate_key() -> Endpoint<GeneratedKey> {
        Endpoint::new(RequestDescriptor::post("/peers/generate-key"))
    }

    /// 客户端配置文件（wg-quick 格式）
    pub fn config(id: PeerId) -> Download {
        Download::new(RequestDescriptor::get(format!("/peers/{id}/config")))
    }

    /// 客户端配置二维码（PNG）
    pub fn config_qrcode(id: PeerId) -> Download {
        Download::new(RequestDescriptor::get(format!("/peers/{id}/config/qrcode")))
    }

    pub fn batch_create(peers: &[NewPeer]) -> Result<Endpoint<BatchCreated>, InvalidBody> {
        let body = BatchPeers {
            peers: peers.to_vec(),
        };
        Ok(Endpoint::new(
            RequestDescriptor::post("/peers/batch").with_json(&body)?,
        ))
    }

    pub fn batch_toggle(ids: &[PeerId]) -> Result<Endpoint<BatchUpdated>, InvalidBody> {
        Ok(Endpoint::new(
            RequestDescriptor::post("/peers/batch-toggle").with_json(ids)?,
        ))
    }

    /// id 数组作为 DELETE 的请求体发送
    pub fn batch_delete(ids: &[PeerId]) -> Result<Endpoint<BatchDeleted>, InvalidBody> {
        Ok(Endpoint::new(
            RequestDescriptor::delete("/peers/batch").with_json(ids)?,
        ))
    }
}

pub mod acls {
    use super::*;

    pub fn list() -> Endpoint<Vec<Acl>> {
        Endpoint::new(RequestDescriptor::get("/acls"))
    }

    pub fn create(acl: &AclPayload) -> Result<Endpoint<SyncAck>, InvalidBody> {
        Ok(Endpoint::new(RequestDescriptor::post("/acls").with_json(acl)?))
    }

    pub fn update(id: AclId, acl: &AclPayload) -> Result<Endpoint<SyncAck>, InvalidBody> {
        Ok(Endpoint::new(
            RequestDescriptor::put(format!("/acls/{id}")).with_json(acl)?,
        ))
    }

    pub fn delete(id: AclId) -> Endpoint<SyncAck> {
        Endpoint::new(RequestDescriptor::delete(format!("/acls/{id}")))
    }

    pub fn enable(id: AclId) -> Endpoint<SyncAck> {
        Endpoint::new(RequestDescriptor::put(format!("/acls/{id}/enable")))
    }

    pub fn disable(id: AclId) -> Endpoint<SyncAck> {
        Endpoint::new(RequestDescriptor::put(format!("/acls/{id}/disable")))
    }

    pub fn batch_create(acls: &[AclPayload]) -> Result<Endpoint<BatchCreated>, InvalidBody> {
        let body = BatchAcls {
            acls: acls.to_vec(),
        };
        Ok(Endpoint::new(
            RequestDescriptor::post("/acls/batch").with_json(&body)?,
        ))
    }

    pub fn batch_toggle(ids: &[AclId]) -> Result<Endpoint<BatchUpdated>, InvalidBody> {
        Ok(Endpoint::new(
            RequestDescriptor::post("/acls/batch-toggle").with_json(ids)?,
        ))
    }

    pub fn batch_delete(ids: &[AclId]) -> Result<Endpoint<BatchDeleted>, InvalidBody> {
        Ok(Endpoint::new(
            RequestDescriptor::delete("/acls/batch").with_json(ids)?,
        ))
    }
}

pub mod system {
    use super::*;

    pub fn health() -> Endpoint<serde_json::Value> {
        Endpoint::new(RequestDescriptor::get("/health"))
    }

    pub fn stats() -> Endpoint<SystemStats> {
        Endpoint::new(RequestDescriptor::get("/system/stats"))
    }
}

pub mod activities {
    use super::*;

    pub fn recent(limit: u32) -> Endpoint<Vec<Activity>> {
        Endpoint::new(RequestDescriptor::get("/activities").with_query("limit", limit))
    }
}

pub mod backup {
    use super::*;

    pub fn export() -> Endpoint<serde_json::Value> {
        Endpoint::new(RequestDescriptor::get("/backup/export"))
    }

    /// 导入由 [`export`] 得到的配置
    pub fn import(config: serde_json::Value) -> Endpoint<ImportReport> {
        Endpoint::new(RequestDescriptor::post("/backup/import").with_json_value(config))
    }

    pub fn status() -> Endpoint<BackupStatus> {
        Endpoint::new(RequestDescriptor::get("/backup/status"))
    }
}

pub mod settings {
    use super::*;

    pub fn list() -> Endpoint<SettingsMap> {
        Endpoint::new(RequestDescriptor::get("/system/settings"))
    }

    pub fn update_all(settings: &SettingsMap) -> Result<Endpoint<Ack>, InvalidBody> {
        Ok(Endpoint::new(
            RequestDescriptor::put("/system/settings").with_json(settings)?,
        ))
    }

    pub fn get(key: &str) -> Endpoint<SettingValue> {
        Endpoint::new(RequestDescriptor::get(format!(
            "/system/settings/{}",
            urlencoding::encode(key)
        )))
    }

    pub fn update(key: &str, value: &str) -> Result<Endpoint<Ack>, InvalidBody> {
        let body = SettingValue {
            value: value.to_string(),
        };
        Ok(Endpoint::new(
            RequestDescriptor::put(format!("/system/settings/{}", urlencoding::encode(key)))
                .with_json(&body)?,
        ))
    }
}
