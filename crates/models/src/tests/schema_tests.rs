use crate::db::connect_in_memory;
use crate::{case_progress, lawyer, merchant, unix_now};
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub(crate) fn lawyer_row(code: &str, open_id: &str) -> lawyer::ActiveModel {
    lawyer::ActiveModel {
        lawyer_code: Set(code.to_string()),
        open_id: Set(open_id.to_string()),
        name: Set("李律师".to_string()),
        avatar: Set(String::new()),
        phone: Set("13900000000".to_string()),
        email: Set(String::new()),
        law_firm: Set(String::new()),
        license_no: Set(String::new()),
        legal_field: Set("婚姻家事".to_string()),
        practice_years: Set(5),
        introduction: Set(String::new()),
        status: Set(lawyer::LawyerStatus::Active.code()),
        audit_status: Set(lawyer::AuditStatus::Pending.code()),
        audit_remark: Set(String::new()),
        view_count: Set(0),
        like_count: Set(0),
        version: Set(1),
        create_by: Set(open_id.to_string()),
        create_time: Set(unix_now()),
        update_by: Set(String::new()),
        update_time: Set(0),
        delete_by: Set(String::new()),
        delete_time: Set(0),
        ..Default::default()
    }
}

pub(crate) fn progress_row(lawyer_code: &str, open_id: &str) -> case_progress::ActiveModel {
    let now = unix_now();
    case_progress::ActiveModel {
        service_code: Set("SVC-1".to_string()),
        service_version: Set(1),
        lawyer_code: Set(lawyer_code.to_string()),
        open_id: Set(open_id.to_string()),
        case_type: Set(1),
        current_stage: Set(1),
        case_status: Set(1),
        created_on: Set(now),
        modified_on: Set(now),
        deleted_on: Set(0),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_case_progress_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let created = progress_row("LAW-1", "client-1").insert(&db).await?;
    assert!(created.id > 0);
    assert_eq!(created.deleted_on, 0);

    let mut am: case_progress::ActiveModel = created.clone().into();
    am.current_stage = Set(3);
    let updated = am.update(&db).await?;
    assert_eq!(updated.current_stage, 3);

    let by_client = case_progress::Entity::find()
        .filter(case_progress::Column::OpenId.eq("client-1"))
        .all(&db)
        .await?;
    assert_eq!(by_client.len(), 1);

    case_progress::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(case_progress::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_lawyer_code_is_unique() -> Result<()> {
    let db = setup_test_db().await?;

    lawyer_row("LAW-9", "owner-a").insert(&db).await?;
    let dup = lawyer_row("LAW-9", "owner-b").insert(&db).await;
    assert!(dup.is_err(), "duplicate lawyer_code must be rejected by the index");

    lawyer_row("LAW-10", "owner-b").insert(&db).await?;
    assert_eq!(lawyer::Entity::find().all(&db).await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_merchant_defaults_round_trip() -> Result<()> {
    let db = setup_test_db().await?;

    let now = unix_now();
    let m = merchant::ActiveModel {
        name: Set("老街火锅".to_string()),
        logo: Set(String::new()),
        cover_image: Set(String::new()),
        business_license: Set(String::new()),
        contact_name: Set(String::new()),
        contact_phone: Set(String::new()),
        province: Set("四川".to_string()),
        city: Set("成都".to_string()),
        district: Set("锦江".to_string()),
        address: Set(String::new()),
        longitude: Set(104.0817),
        latitude: Set(30.6571),
        rating: Set(merchant::DEFAULT_RATING),
        month_sales: Set(0),
        business_hours: Set(String::new()),
        table_count: Set(12),
        admin_id: Set(3),
        status: Set(merchant::MerchantStatus::default().code()),
        notice: Set(String::new()),
        created_on: Set(now),
        modified_on: Set(now),
        deleted_on: Set(0),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    let found = merchant::Entity::find_by_id(m.id).one(&db).await?.expect("merchant exists");
    assert_eq!(found.status, merchant::MerchantStatus::Open.code());
    assert!((found.latitude - 30.6571).abs() < 1e-9);
    assert_eq!(found.rating, 5.0);
    Ok(())
}
