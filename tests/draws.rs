//! 集成测试：真实仓储 + 迁移，跑在内存 SQLite 上。

use std::collections::BTreeMap;

use chrono::Duration;
use lottohub_backend::AppError;
use lottohub_backend::entities::draws::{PrizeBreakdown, PrizeTier};
use lottohub_backend::models::{CategoryRequest, DrawListQuery, DrawRequest};
use lottohub_backend::services::{DrawCategoryService, DrawService};
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

async fn setup_db() -> DatabaseConnection {
    // 内存库必须限制为单连接，否则每个连接各自是一个空库
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1);
    let db = Database::connect(options).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

fn category_request(name: &str) -> CategoryRequest {
    CategoryRequest {
        name: name.to_string(),
        slug: None,
        description: None,
        color: Some("#10B981".to_string()),
        draw_schedule: None,
        is_active: true,
        sort_order: 10,
    }
}

fn draw_request(category_id: i64, number: &str, status: &str, date: &str) -> DrawRequest {
    DrawRequest {
        draw_category_id: category_id,
        draw_number: number.to_string(),
        draw_type: None,
        winning_numbers: vec![5, 12, 23, 31, 40, 44],
        special_numbers: Some(vec![7]),
        draw_date: date.to_string(),
        status: status.to_string(),
        prize_pool: None,
        total_winners: 0,
        prize_breakdown: None,
        notes: None,
        is_featured: false,
    }
}

async fn create_category(db: &DatabaseConnection, name: &str) -> i64 {
    DrawCategoryService::new(db.clone())
        .create(&category_request(name))
        .await
        .expect("create category")
        .id
}

fn assert_validation_error(err: AppError, field: &str) {
    match err {
        AppError::ValidationError(errors) => {
            assert!(
                errors.fields().contains_key(field),
                "expected error on field {field}, got {errors}"
            );
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[tokio::test]
async fn test_prize_breakdown_round_trip() {
    let db = setup_db().await;
    let service = DrawService::new(db.clone());
    let category_id = create_category(&db, "Round Trip").await;

    let mut tiers = BTreeMap::new();
    tiers.insert(
        "first_prize".to_string(),
        PrizeTier {
            winners: 2,
            amount: Decimal::new(1_000_000, 0),
        },
    );
    let breakdown = PrizeBreakdown(tiers);

    let mut req = draw_request(category_id, "1001/25", "completed", "2025-01-01 21:30:00");
    req.prize_pool = Some(Decimal::new(800_000_000, 2));
    req.total_winners = 2;
    req.prize_breakdown = Some(breakdown.clone());

    let created = service.create(&req).await.expect("create draw");
    let fetched = service
        .find_with_category(created.id)
        .await
        .expect("read back");

    assert_eq!(fetched.prize_breakdown, Some(breakdown));
    assert_eq!(fetched.winning_numbers, vec![5, 12, 23, 31, 40, 44]);
    assert_eq!(fetched.special_numbers, Some(vec![7]));
    assert_eq!(fetched.prize_pool, Some(Decimal::new(800_000_000, 2)));
    let category = fetched.category.expect("embedded category");
    assert_eq!(category.slug, "round-trip");
}

#[tokio::test]
async fn test_draw_number_uniqueness() {
    let db = setup_db().await;
    let service = DrawService::new(db.clone());
    let category_id = create_category(&db, "Uniqueness").await;

    let first = service
        .create(&draw_request(
            category_id,
            "2001/25",
            "completed",
            "2025-01-01 21:30:00",
        ))
        .await
        .expect("first create");

    // 相同期号的第二条创建失败
    let err = service
        .create(&draw_request(
            category_id,
            "2001/25",
            "completed",
            "2025-01-02 21:30:00",
        ))
        .await
        .unwrap_err();
    assert_validation_error(err, "draw_number");

    let second = service
        .create(&draw_request(
            category_id,
            "2002/25",
            "completed",
            "2025-01-02 21:30:00",
        ))
        .await
        .expect("second create");

    // 改成别人的期号失败
    let err = service
        .update(
            second.id,
            &draw_request(category_id, "2001/25", "completed", "2025-01-02 21:30:00"),
        )
        .await
        .unwrap_err();
    assert_validation_error(err, "draw_number");

    // 改回自己的期号成功
    service
        .update(
            first.id,
            &draw_request(category_id, "2001/25", "completed", "2025-01-01 21:30:00"),
        )
        .await
        .expect("self update");
}

#[tokio::test]
async fn test_winning_numbers_range_enforced() {
    let db = setup_db().await;
    let service = DrawService::new(db.clone());
    let category_id = create_category(&db, "Ranges").await;

    let mut req = draw_request(category_id, "3001/25", "completed", "2025-01-01 21:30:00");
    req.winning_numbers = vec![5, 50];
    let err = service.create(&req).await.unwrap_err();
    assert_validation_error(err, "winning_numbers");

    let mut req = draw_request(category_id, "3001/25", "completed", "2025-01-01 21:30:00");
    req.special_numbers = Some(vec![0]);
    let err = service.create(&req).await.unwrap_err();
    assert_validation_error(err, "special_numbers");
}

#[tokio::test]
async fn test_pending_draw_may_have_empty_numbers() {
    let db = setup_db().await;
    let service = DrawService::new(db.clone());
    let category_id = create_category(&db, "Pending").await;

    let mut req = draw_request(category_id, "4001/25", "pending", "2025-06-01 20:00:00");
    req.winning_numbers = vec![];
    req.special_numbers = None;
    service.create(&req).await.expect("pending without numbers");

    let mut req = draw_request(category_id, "4002/25", "completed", "2025-06-01 20:00:00");
    req.winning_numbers = vec![];
    let err = service.create(&req).await.unwrap_err();
    assert_validation_error(err, "winning_numbers");
}

#[tokio::test]
async fn test_create_requires_existing_category_and_valid_status() {
    let db = setup_db().await;
    let service = DrawService::new(db.clone());

    let err = service
        .create(&draw_request(9999, "5001/25", "completed", "2025-01-01"))
        .await
        .unwrap_err();
    assert_validation_error(err, "draw_category_id");

    let category_id = create_category(&db, "Statuses").await;
    let err = service
        .create(&draw_request(
            category_id,
            "5001/25",
            "archived",
            "2025-01-01",
        ))
        .await
        .unwrap_err();
    assert_validation_error(err, "status");
}

#[tokio::test]
async fn test_category_cascade_delete() {
    let db = setup_db().await;
    let draw_service = DrawService::new(db.clone());
    let category_service = DrawCategoryService::new(db.clone());

    let doomed = create_category(&db, "Doomed").await;
    let survivor = create_category(&db, "Survivor").await;

    for i in 0..3 {
        draw_service
            .create(&draw_request(
                doomed,
                &format!("600{i}/25"),
                "completed",
                "2025-01-01 21:30:00",
            ))
            .await
            .expect("doomed draw");
    }
    draw_service
        .create(&draw_request(
            survivor,
            "6009/25",
            "completed",
            "2025-01-01 21:30:00",
        ))
        .await
        .expect("survivor draw");

    category_service.delete(doomed).await.expect("delete category");

    // 级联后不留孤儿记录
    let page = draw_service.list(&DrawListQuery::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].draw_number, "6009/25");

    assert!(matches!(
        category_service.find(doomed).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_filter_engine() {
    let db = setup_db().await;
    let draw_service = DrawService::new(db.clone());
    let category_service = DrawCategoryService::new(db.clone());

    // 种子迁移已提供 mark-six 分类
    let mark_six = category_service
        .list_active()
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.slug == "mark-six")
        .expect("seeded category")
        .id;
    let other = create_category(&db, "Other Games").await;

    draw_service
        .create(&draw_request(mark_six, "0001/25", "completed", "2025-01-01 21:30:00"))
        .await
        .unwrap();
    draw_service
        .create(&draw_request(mark_six, "0002/25", "live", "2025-02-01 21:30:00"))
        .await
        .unwrap();
    draw_service
        .create(&draw_request(other, "0003/25", "completed", "2025-02-15 20:00:00"))
        .await
        .unwrap();
    draw_service
        .create(&draw_request(other, "0004/25", "pending", "2025-03-01 20:00:00"))
        .await
        .unwrap();
    draw_service
        .create(&draw_request(other, "0005/25", "cancelled", "2025-03-02 20:00:00"))
        .await
        .unwrap();

    // 仅 status
    let page = draw_service
        .list(&DrawListQuery {
            status: Some("live".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].draw_number, "0002/25");

    // category + status 组合（规格中的示例场景）
    let page = draw_service
        .list(&DrawListQuery {
            category: Some("mark-six".to_string()),
            status: Some("completed".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].draw_number, "0001/25");

    // category + status + 日期区间取交集
    let page = draw_service
        .list(&DrawListQuery {
            category: Some("other-games".to_string()),
            status: Some("completed".to_string()),
            date_from: Some("2025-02-01".to_string()),
            date_to: Some("2025-02-15".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].draw_number, "0003/25");

    // 期号子串搜索
    let page = draw_service
        .list(&DrawListQuery {
            draw_number: Some("0004".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 1);

    // 空筛选返回全部，draw_date 倒序
    let page = draw_service.list(&DrawListQuery::default()).await.unwrap();
    assert_eq!(page.total, 5);
    let dates: Vec<_> = page.data.iter().map(|d| d.draw_date).collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);

    // 未知 status / 非法日期视为无约束
    let page = draw_service
        .list(&DrawListQuery {
            status: Some("garbage".to_string()),
            date_from: Some("not-a-date".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 5);
}

#[tokio::test]
async fn test_date_bounds_are_inclusive() {
    let db = setup_db().await;
    let draw_service = DrawService::new(db.clone());
    let category_id = create_category(&db, "Dates").await;

    draw_service
        .create(&draw_request(category_id, "7001/25", "completed", "2025-03-01 09:00:00"))
        .await
        .unwrap();
    draw_service
        .create(&draw_request(category_id, "7002/25", "completed", "2025-03-15 23:30:00"))
        .await
        .unwrap();
    draw_service
        .create(&draw_request(category_id, "7003/25", "completed", "2025-04-02 09:00:00"))
        .await
        .unwrap();

    // 边界当天无论时刻均包含
    let page = draw_service
        .list(&DrawListQuery {
            date_from: Some("2025-03-01".to_string()),
            date_to: Some("2025-03-15".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 2);
    let numbers: Vec<_> = page.data.iter().map(|d| d.draw_number.as_str()).collect();
    assert_eq!(numbers, vec!["7002/25", "7001/25"]);
}

#[tokio::test]
async fn test_pagination_fixed_page_size() {
    let db = setup_db().await;
    let draw_service = DrawService::new(db.clone());
    let category_id = create_category(&db, "Pages").await;

    let base = chrono::DateTime::parse_from_rfc3339("2025-01-01T00:00:00+00:00")
        .unwrap()
        .with_timezone(&chrono::Utc);
    for i in 0..45 {
        let date = (base + Duration::hours(i)).format("%Y-%m-%d %H:%M:%S").to_string();
        draw_service
            .create(&draw_request(
                category_id,
                &format!("P{i:04}/25"),
                "completed",
                &date,
            ))
            .await
            .expect("create page draw");
    }

    let page = draw_service
        .list(&DrawListQuery {
            page: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.data.len(), 20);
    assert_eq!(page.total, 45);
    assert_eq!(page.page_size, 20);
    assert_eq!(page.total_pages, 3);

    let page = draw_service
        .list(&DrawListQuery {
            page: Some(3),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.data.len(), 5);

    // 超出末页返回空数据页而不是错误
    let page = draw_service
        .list(&DrawListQuery {
            page: Some(4),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.total, 45);
}

#[tokio::test]
async fn test_landing_page_views() {
    let db = setup_db().await;
    let draw_service = DrawService::new(db.clone());
    let category_id = create_category(&db, "Views").await;

    // 6 条 live，只取最早的 5 条（升序）
    for i in 0..6 {
        draw_service
            .create(&draw_request(
                category_id,
                &format!("L00{i}/25"),
                "live",
                &format!("2025-05-0{} 20:00:00", i + 1),
            ))
            .await
            .unwrap();
    }
    let live = draw_service.live_draws().await.unwrap();
    assert_eq!(live.len(), 5);
    assert_eq!(live[0].draw_number, "L000/25");
    assert!(live.windows(2).all(|w| w[0].draw_date <= w[1].draw_date));

    // 精选：completed 才可见，倒序取 3
    for i in 0..4 {
        let mut req = draw_request(
            category_id,
            &format!("F00{i}/25"),
            "completed",
            &format!("2025-04-0{} 21:00:00", i + 1),
        );
        req.is_featured = true;
        draw_service.create(&req).await.unwrap();
    }
    let mut req = draw_request(category_id, "F009/25", "pending", "2025-04-09 21:00:00");
    req.is_featured = true;
    req.winning_numbers = vec![];
    draw_service.create(&req).await.unwrap();

    let featured = draw_service.featured_draws().await.unwrap();
    assert_eq!(featured.len(), 3);
    assert_eq!(featured[0].draw_number, "F003/25");
    assert!(featured.iter().all(|d| d.draw_number.starts_with('F')));
    assert!(!featured.iter().any(|d| d.draw_number == "F009/25"));

    // 相关开奖：同分类、排除自身、仅 completed、最多 5 条
    let anchor = draw_service
        .create(&draw_request(category_id, "R000/25", "completed", "2025-03-20 21:00:00"))
        .await
        .unwrap();
    for i in 1..=6 {
        draw_service
            .create(&draw_request(
                category_id,
                &format!("R00{i}/25"),
                "completed",
                &format!("2025-03-{:02} 21:00:00", i + 1),
            ))
            .await
            .unwrap();
    }
    let related = draw_service.related_draws(&anchor).await.unwrap();
    assert_eq!(related.len(), 5);
    assert!(related.iter().all(|d| d.id != anchor.id));
    assert!(
        related
            .iter()
            .all(|d| d.draw_category_id == anchor.draw_category_id)
    );
}

#[tokio::test]
async fn test_category_slug_rules() {
    let db = setup_db().await;
    let service = DrawCategoryService::new(db.clone());

    let created = service
        .create(&category_request("Night Draw"))
        .await
        .expect("create category");
    assert_eq!(created.slug, "night-draw");

    // slug 冲突
    let err = service.create(&category_request("Night Draw")).await.unwrap_err();
    assert_validation_error(err, "slug");

    // 更新保持自己的 slug 合法
    let mut req = category_request("Night Draw");
    req.description = Some("Updated".to_string());
    let updated = service.update(created.id, &req).await.expect("self update");
    assert_eq!(updated.slug, "night-draw");
    assert_eq!(updated.description.as_deref(), Some("Updated"));

    // 删除后查询 NotFound
    service.delete(created.id).await.unwrap();
    assert!(matches!(
        service.find(created.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}
