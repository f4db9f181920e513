use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::merchant::{self, MerchantStatus};

use super::domain::{MerchantFilter, MerchantUpdate, NearbyMerchant, NearbyQuery, NewMerchant};
use super::repository::MerchantRepository;
use crate::errors::ServiceError;
use crate::pagination::{OffsetWindow, Page};

pub struct MerchantService<R: MerchantRepository> {
    repo: Arc<R>,
}

impl<R: MerchantRepository> MerchantService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn exists(&self, id: i32) -> Result<bool, ServiceError> { self.repo.exists(id).await }

    pub async fn get(&self, id: i32) -> Result<Option<merchant::Model>, ServiceError> { self.repo.find(id).await }

    /// `offset` is a raw row offset; `page_size` defaults to 10 and is clamped to [1, 100].
    pub async fn list(&self, filter: &MerchantFilter, offset: u64, page_size: Option<u64>) -> Result<Page<merchant::Model>, ServiceError> {
        let window = OffsetWindow::new(offset, page_size);
        let list = self.repo.list(filter, window).await?;
        let total = self.repo.count(filter).await?;
        Ok(Page { list, total })
    }

    #[instrument(skip(self, input), fields(name = %input.name, admin_id = input.admin_id))]
    pub async fn create(&self, input: NewMerchant) -> Result<merchant::Model, ServiceError> {
        input.validate()?;
        let created = self.repo.insert(&input).await?;
        info!(merchant_id = created.id, "merchant_created");
        Ok(created)
    }

    #[instrument(skip(self, input), fields(merchant_id = id))]
    pub async fn update(&self, id: i32, input: MerchantUpdate) -> Result<merchant::Model, ServiceError> {
        input.validate()?;
        let updated = self.repo.update(id, &input).await?.ok_or_else(|| ServiceError::not_found("merchant"))?;
        info!(merchant_id = id, "merchant_updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(merchant_id = id))]
    pub async fn update_status(&self, id: i32, status: i32) -> Result<(), ServiceError> {
        let status = MerchantStatus::try_from(status)?;
        if !self.repo.update_status(id, status.code()).await? {
            return Err(ServiceError::not_found("merchant"));
        }
        info!(merchant_id = id, status = ?status, "merchant_status_changed");
        Ok(())
    }

    #[instrument(skip(self), fields(merchant_id = id))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.soft_delete(id).await? {
            return Err(ServiceError::not_found("merchant"));
        }
        info!(merchant_id = id, "merchant_deleted");
        Ok(())
    }

    pub async fn nearby(&self, query: NearbyQuery) -> Result<Vec<NearbyMerchant>, ServiceError> {
        query.validate()?;
        let hits = self.repo.nearby(query).await?;
        debug!(count = hits.len(), distance_m = query.distance, "nearby_merchants");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merchant::repository::SeaOrmMerchantRepository;
    use crate::test_support::get_db;

    async fn svc() -> Result<MerchantService<SeaOrmMerchantRepository>, anyhow::Error> {
        let db = get_db().await?;
        Ok(MerchantService::new(Arc::new(SeaOrmMerchantRepository { db })))
    }

    fn at(name: &str, longitude: f64, latitude: f64) -> NewMerchant {
        NewMerchant {
            name: name.into(),
            logo: String::new(),
            cover_image: String::new(),
            business_license: String::new(),
            contact_name: String::new(),
            contact_phone: "13800001111".into(),
            province: "北京".into(),
            city: "北京".into(),
            district: "东城".into(),
            address: String::new(),
            longitude,
            latitude,
            rating: None,
            month_sales: 0,
            business_hours: String::new(),
            table_count: 0,
            admin_id: 9,
            status: None,
            notice: String::new(),
        }
    }

    #[tokio::test]
    async fn create_applies_defaults_and_get_round_trips() -> Result<(), anyhow::Error> {
        let svc = svc().await?;
        let m = svc.create(at("前门烤鸭", 116.3975, 39.9087)).await?;
        assert_eq!(m.rating, 5.0);
        assert_eq!(m.status, MerchantStatus::Open.code());
        assert_eq!(m.month_sales, 0);

        let found = svc.get(m.id).await?.expect("exists");
        assert_eq!(found, m);
        assert!(svc.exists(m.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() -> Result<(), anyhow::Error> {
        let svc = svc().await?;
        let m = svc.create(at("胡同咖啡", 116.40, 39.91)).await?;
        svc.delete(m.id).await?;
        assert!(svc.get(m.id).await?.is_none());
        assert!(!svc.exists(m.id).await?);
        assert!(matches!(svc.delete(m.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.update_status(m.id, 0).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_touches_only_present_fields() -> Result<(), anyhow::Error> {
        let svc = svc().await?;
        let m = svc.create(at("老店", 116.40, 39.91)).await?;
        let upd = MerchantUpdate { notice: Some("今日休息".into()), rating: Some(4.5), ..Default::default() };
        let updated = svc.update(m.id, upd).await?;
        assert_eq!(updated.notice, "今日休息");
        assert_eq!(updated.rating, 4.5);
        assert_eq!(updated.name, "老店");
        assert!(matches!(svc.update(9999, MerchantUpdate::default()).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn status_update_validates_code() -> Result<(), anyhow::Error> {
        let svc = svc().await?;
        let m = svc.create(at("店", 116.40, 39.91)).await?;
        assert!(svc.update_status(m.id, 7).await.unwrap_err().is_validation());
        svc.update_status(m.id, MerchantStatus::Disabled.code()).await?;
        assert_eq!(svc.get(m.id).await?.expect("exists").status, 3);
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_city_and_counts() -> Result<(), anyhow::Error> {
        let svc = svc().await?;
        for i in 0..5 {
            svc.create(at(&format!("京店{i}"), 116.4, 39.9)).await?;
        }
        svc.create(NewMerchant { city: "上海".into(), ..at("沪店", 121.47, 31.23) }).await?;

        let bj = MerchantFilter { city: Some("北京".into()), ..Default::default() };
        let page = svc.list(&bj, 0, Some(3)).await?;
        assert_eq!(page.total, 5);
        assert_eq!(page.list.len(), 3);
        let rest = svc.list(&bj, 3, Some(3)).await?;
        assert_eq!(rest.list.len(), 2);
        assert!(page.list.iter().chain(rest.list.iter()).all(|m| m.city == "北京"));

        let all = svc.list(&MerchantFilter::default(), 0, None).await?;
        assert_eq!(all.total, 6);
        Ok(())
    }

    #[tokio::test]
    async fn list_with_offset_beyond_signed_range_is_empty() -> Result<(), anyhow::Error> {
        let svc = svc().await?;
        svc.create(at("京店", 116.4, 39.9)).await?;
        let page = svc.list(&MerchantFilter::default(), u64::MAX, Some(10)).await?;
        assert!(page.list.is_empty());
        assert_eq!(page.total, 1);
        Ok(())
    }

    #[tokio::test]
    async fn nearby_with_zero_distance_matches_only_exact_point() -> Result<(), anyhow::Error> {
        let svc = svc().await?;
        let exact = svc.create(at("正中", 116.3975, 39.9087)).await?;
        // ~1.1 m north
        svc.create(at("隔壁", 116.3975, 39.90871)).await?;

        let hits = svc.nearby(NearbyQuery { longitude: 116.3975, latitude: 39.9087, distance: 0.0 }).await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].merchant.id, exact.id);
        assert_eq!(hits[0].distance, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn nearby_orders_by_distance_and_skips_deleted() -> Result<(), anyhow::Error> {
        let svc = svc().await?;
        // Tiananmen; the others sit roughly 1 km, 1.3 km and 22 km away.
        let far = svc.create(at("通州", 116.66, 39.91)).await?;
        let mid = svc.create(at("王府井", 116.4109, 39.9149)).await?;
        let near = svc.create(at("前门", 116.3975, 39.8997)).await?;
        let gone = svc.create(at("已关", 116.3976, 39.9088)).await?;
        svc.delete(gone.id).await?;

        let hits = svc.nearby(NearbyQuery { longitude: 116.3975, latitude: 39.9087, distance: 5_000.0 }).await?;
        let ids: Vec<i32> = hits.iter().map(|h| h.merchant.id).collect();
        assert_eq!(ids, vec![near.id, mid.id]);
        assert!(hits[0].distance < hits[1].distance);
        assert!(hits.iter().all(|h| h.distance <= 5_000.0));
        assert!(!ids.contains(&far.id));
        Ok(())
    }

    #[tokio::test]
    async fn nearby_rejects_bad_input() -> Result<(), anyhow::Error> {
        let svc = svc().await?;
        let err = svc.nearby(NearbyQuery { longitude: 200.0, latitude: 0.0, distance: 10.0 }).await.unwrap_err();
        assert!(err.is_validation());
        Ok(())
    }
}
