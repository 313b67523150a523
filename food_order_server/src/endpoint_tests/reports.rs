use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::NaiveDate;
use food_order_engine::{
    db_types::{Area, FoodItem, RestaurantId},
    report_objects::{CustomerOrderCount, DailyRevenue, ItemCount},
    PriceCatalog,
    ReportError,
    ReportingApi,
};
use fos_common::Rupees;

use super::helpers::get_request;
use crate::{
    endpoint_tests::mocks::MockReportManager,
    routes::{
        DailyRevenue7daysRoute,
        LastMonthEarningsRoute,
        RestaurantSummaryRoute,
        SubsetEarningsRoute,
        TopCustomersRoute,
        VegEarningsRoute,
    },
};

fn configure(cfg: &mut ServiceConfig, reports: MockReportManager) {
    cfg.app_data(web::Data::new(ReportingApi::new(reports, PriceCatalog::standard())))
        .service(LastMonthEarningsRoute::<MockReportManager>::new())
        .service(SubsetEarningsRoute::<MockReportManager>::new())
        .service(VegEarningsRoute::<MockReportManager>::new())
        .service(TopCustomersRoute::<MockReportManager>::new())
        .service(DailyRevenue7daysRoute::<MockReportManager>::new())
        .service(RestaurantSummaryRoute::<MockReportManager>::new());
}

#[actix_web::test]
async fn last_month_earnings() {
    let _ = env_logger::try_init().ok();
    let mut reports = MockReportManager::new();
    reports
        .expect_earnings_for_area()
        .withf(|area, prices, window| *area == Area::Mumbai && prices == &PriceCatalog::standard() && window.is_some())
        .times(2)
        .returning(|_, _, _| Ok(Rupees::from(500)));
    let reports = web::Data::new(ReportingApi::new(reports, PriceCatalog::standard()));
    for path in ["/orders/reports/mumbai/last_month", "/orders/reports/Mumbai/last_month/"] {
        let reports = reports.clone();
        let (status, body) = get_request("", path, |cfg| {
            cfg.app_data(reports).service(LastMonthEarningsRoute::<MockReportManager>::new());
        })
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"total_earnings":500}"#);
    }
}

#[actix_web::test]
async fn unknown_region() {
    let _ = env_logger::try_init().ok();
    let mut reports = MockReportManager::new();
    reports.expect_earnings_for_area().never();
    let (status, body) = get_request("", "/orders/reports/delhi/last_month", |cfg| configure(cfg, reports)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Unknown area: delhi"), "{body}");
}

#[actix_web::test]
async fn subset_earnings_only_price_veg_items() {
    let _ = env_logger::try_init().ok();
    let mut reports = MockReportManager::new();
    reports
        .expect_earnings_for_area()
        .withf(|area, prices, window| {
            *area == Area::Bangalore &&
                window.is_none() &&
                prices.contains(FoodItem::VegFriedRice) &&
                !prices.contains(FoodItem::ChickenNoodles)
        })
        .returning(|_, _, _| Ok(Rupees::from(270)));
    let (status, body) =
        get_request("", "/orders/reports/bangalore/subset_earnings", |cfg| configure(cfg, reports)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"subset_earnings":270}"#);
}

#[actix_web::test]
async fn veg_earnings_is_an_alias() {
    let _ = env_logger::try_init().ok();
    let mut reports = MockReportManager::new();
    reports.expect_earnings_for_area().withf(|_, _, window| window.is_none()).returning(|_, _, _| Ok(Rupees::from(0)));
    let (status, body) = get_request("", "/orders/reports/bangalore/veg_earnings", |cfg| configure(cfg, reports)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"subset_earnings":0}"#);
}

#[actix_web::test]
async fn top_customers() {
    let _ = env_logger::try_init().ok();
    let mut reports = MockReportManager::new();
    reports.expect_customer_order_counts().withf(|limit| *limit == 3).returning(|_| {
        Ok(vec![
            CustomerOrderCount { name: "Ravi".into(), orders_count: 4 },
            CustomerOrderCount { name: "Asha".into(), orders_count: 2 },
        ])
    });
    let (status, body) = get_request("", "/orders/reports/top_customers", |cfg| configure(cfg, reports)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"[{"name":"Ravi","orders_count":4},{"name":"Asha","orders_count":2}]"#);
}

#[actix_web::test]
async fn daily_revenue() {
    let _ = env_logger::try_init().ok();
    let mut reports = MockReportManager::new();
    reports.expect_daily_revenue().returning(|_, _| {
        Ok(vec![
            DailyRevenue {
                date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
                area: Area::Bangalore,
                revenue: Rupees::from(120),
            },
            DailyRevenue {
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                area: Area::Mumbai,
                revenue: Rupees::from(350),
            },
        ])
    });
    let (status, body) = get_request("", "/orders/reports/daily_revenue_7days", |cfg| configure(cfg, reports)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        concat!(
            r#"[{"date":"2024-06-02","area":"Bangalore","revenue":120},"#,
            r#"{"date":"2024-06-01","area":"Mumbai","revenue":350}]"#
        )
    );
}

#[actix_web::test]
async fn restaurant_summary() {
    let _ = env_logger::try_init().ok();
    let restaurant_id = RestaurantId::random();
    let expected = restaurant_id.clone();
    let mut reports = MockReportManager::new();
    reports.expect_item_counts_for_restaurant().withf(move |id| id == &expected).returning(|_| {
        Ok(vec![
            ItemCount { food_item: FoodItem::ChickenNoodles, count: 1 },
            ItemCount { food_item: FoodItem::VegManchurian, count: 3 },
        ])
    });
    let path = format!("/orders/reports/restaurant/{restaurant_id}/summary");
    let (status, body) = get_request("", &path, |cfg| configure(cfg, reports)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"[{"food_item":"chicken_noodles","count":1},{"food_item":"veg_manchurian","count":3}]"#);
}

#[actix_web::test]
async fn restaurant_summary_with_a_malformed_id() {
    let _ = env_logger::try_init().ok();
    let mut reports = MockReportManager::new();
    reports.expect_item_counts_for_restaurant().never();
    let (status, _) = get_request("", "/orders/reports/restaurant/42/summary", |cfg| configure(cfg, reports)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn report_failures_are_server_errors() {
    let _ = env_logger::try_init().ok();
    let mut reports = MockReportManager::new();
    reports
        .expect_customer_order_counts()
        .returning(|_| Err(ReportError::DatabaseError("database is locked".to_string())));
    let (status, body) = get_request("", "/orders/reports/top_customers", |cfg| configure(cfg, reports)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("database is locked"), "{body}");
}
