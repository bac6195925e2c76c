//! 具名端点门面 (Named Endpoint Façade)
//!
//! 每个方法对应控制器的一个逻辑操作：构造恰好一个请求描述符并交给调度客户端。
//! 不校验参数、不重试、不吞错误。

use serde_json::Value;
use wgdash_shared::endpoints::{acls, activities, auth, backup, peers, settings, system, users};
use wgdash_shared::*;

use crate::dispatch::{BinaryPayload, DispatchClient};
use crate::error::DispatchError;
use crate::request::HttpClient;


type ApiResult<T> = Result<T, DispatchError>;

pub struct WgDashApi<C: HttpClient> {
    client: DispatchClient<C>,
}

impl<C: HttpClient> WgDashApi<C> {
    pub fn new(client: DispatchClient<C>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &DispatchClient<C> {
        &self.client
    }

    // =========================================================
    // 认证与用户
    // =========================================================

    pub async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        self.client.call(auth::login(credentials)).await
    }

    pub async fn change_password(&self, new_password: &str) -> ApiResult<Ack> {
        self.client.call(auth::change_password(new_password)?).await
    }

    pub async fn get_users(&self) -> ApiResult<Vec<User>> {
        self.client.call(users::list()).await
    }

    pub async fn create_user(&self, user: &UserPayload) -> ApiResult<Value> {
        self.client.call(users::create(user)?).await
    }

    pub async fn update_user(&self, id: UserId, user: &UserPayload) -> ApiResult<Value> {
        self.client.call(users::update(id, user)?).await
    }

    pub async fn delete_user(&self, id: UserId) -> ApiResult<Value> {
        self.client.call(users::delete(id)).await
    }

    // =========================================================
    // 节点 (Peers)
    // =========================================================

    pub async fn get_peers(&self) -> ApiResult<Vec<Peer>> {
        self.client.call(peers::list()).await
    }

    pub async fn get_available_peer_ip(&self) -> ApiResult<AvailableIp> {
        self.client.call(peers::available_ip()).await
    }

    pub async fn get_online_nodes_count(&self) -> ApiResult<OnlineNodes> {
        self.client.call(peers::online_nodes_count()).await
    }

    pub async fn create_peer(&self, peer: &NewPeer) -> ApiResult<PeerCreated> {
        self.client.call(peers::create(peer)?).await
    }

    pub async fn update_peer(&self, id: PeerId, update: &PeerUpdate) -> ApiResult<SyncAck> {
        self.client.call(peers::update(id, update)?).await
    }

    pub async fn delete_peer(&self, id: PeerId) -> ApiResult<Ack> {
        self.client.call(peers::delete(id)).await
    }

    pub async fn toggle_peer(&self, id: PeerId) -> ApiResult<PeerToggled> {
        self.client.call(peers::toggle(id)).await
    }

    pub async fn generate_key(&self) -> ApiResult<GeneratedKey> {
        self.client.call(peers::generate_key()).await
    }

    /// 客户端 `.conf` 文件
    pub async fn download_peer_config(&self, id: PeerId) -> ApiResult<BinaryPayload> {
        self.client.download(peers::config(id)).await
    }

    /// 客户端配置二维码（PNG）
    pub async fn get_peer_config_qrcode(&self, id: PeerId) -> ApiResult<BinaryPayload> {
        self.client.download(peers::config_qrcode(id)).await
    }

    pub async fn batch_create_peers(&self, list: &[NewPeer]) -> ApiResult<BatchCreated> {
        self.client.call(peers::batch_create(list)?).await
    }

    pub async fn batch_toggle_peers(&self, ids: &[PeerId]) -> ApiResult<BatchUpdated> {
        self.client.call(peers::batch_toggle(ids)?).await
    }

    pub async fn batch_delete_peers(&self, ids: &[PeerId]) -> ApiResult<BatchDeleted> {
        self.client.call(peers::batch_delete(ids)?).await
    }

    // =========================================================
    // 防火墙规则 (ACLs)
    // =========================================================

    pub async fn get_acls(&self) -> ApiResult<Vec<Acl>> {
        self.client.call(acls::list()).await
    }

    pub async fn create_acl(&self, acl: &AclPayload) -> ApiResult<SyncAck> {
        self.client.call(acls::create(acl)?).await
    }

    pub async fn update_acl(&self, id: AclId, acl: &AclPayload) -> ApiResult<SyncAck> {
        self.client.call(acls::update(id, acl)?).await
    }

    pub async fn delete_acl(&self, id: AclId) -> ApiResult<SyncAck> {
        self.client.call(acls::delete(id)).await
    }

    pub async fn enable_acl(&self, id: AclId) -> ApiResult<SyncAck> {
        self.client.call(acls::enable(id)).await
    }

    pub async fn disable_acl(&self, id: AclId) -> ApiResult<SyncAck> {
        self.client.call(acls::disable(id)).await
    }

    pub async fn batch_create_acls(&self, list: &[AclPayload]) -> ApiResult<BatchCreated> {
        self.client.call(acls::batch_create(list)?).await
    }

    pub async fn batch_toggle_acls(&self, ids: &[AclId]) -> ApiResult<BatchUpdated> {
        self.client.call(acls::batch_toggle(ids)?).await
    }

    pub async fn batch_delete_acls(&self, ids: &[AclId]) -> ApiResult<BatchDeleted> {
        self.client.call(acls::batch_delete(ids)?).await
    }

    // =========================================================
    // 系统、活动与备份
    // =========================================================

    pub async fn health(&self) -> ApiResult<Value> {
        self.client.call(system::health()).await
    }

    pub async fn system_stats(&self) -> ApiResult<SystemStats> {
        self.client.call(system::stats()).await
    }

    /// 最近活动，`None` 时取首页默认条数
    pub async fn recent_activities(&self, limit: Option<u32>) -> ApiResult<Vec<Activity>> {
        let limit = limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
        self.client.call(activities::recent(limit)).await
    }

    pub async fn export_config(&self) -> ApiResult<Value> {
        self.client.call(backup::export()).await
    }

    pub async fn import_config(&self, config: Value) -> ApiResult<ImportReport> {
        self.client.call(backup::import(config)).await
    }

    pub async fn backup_status(&self) -> ApiResult<BackupStatus> {
        self.client.call(backup::status()).await
    }

    // =========================================================
    // 系统设置
    // =========================================================

    pub async fn get_settings(&self) -> ApiResult<SettingsMap> {
        self.client.call(settings::list()).await
    }

    pub async fn update_settings(&self, values: &SettingsMap) -> ApiResult<Ack> {
        self.client.call(settings::update_all(values)?).await
    }

    pub async fn get_setting(&self, key: &str) -> ApiResult<SettingValue> {
        self.client.call(settings::get(key)).await
    }

    pub async fn update_setting(&self, key: &str, value: &str) -> ApiResult<Ack> {
        self.client.call(settings::update(key, value)?).await
    }
}
