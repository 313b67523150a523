use chrono::{Duration, Utc};
use cucumber::{given, then, when};
use food_order_engine::{
    db_types::{Area, FoodItem, NewPayment, NewRestaurant, PaymentStatus, PaymentType, RestaurantId, TransactionId},
    order_objects::{OrderQueryFilter, OrderRequest},
    report_objects::TimeWindow,
    test_utils::prepare_env::backdate_order,
    CustomerManagement,
    OrderFlowError,
    OrderManagement,
};
use fos_common::Rupees;

use crate::cucumber::FoodOrderWorld;

#[given(expr = "a restaurant {word} called {string} in {word}")]
async fn create_restaurant(world: &mut FoodOrderWorld, label: String, name: String, area: String) {
    let area = area.parse::<Area>().expect("Not a valid area");
    let restaurant =
        world
            .restaurant_api()
            .create_restaurant(NewRestaurant::new(name, area))
            .await
            .expect("Error creating restaurant");
    world.restaurants.insert(label, restaurant);
}

#[given(expr = "a successful {word} payment {word}")]
async fn successful_payment(world: &mut FoodOrderWorld, payment_type: String, label: String) {
    record_payment(world, &payment_type, PaymentStatus::Success, label).await;
}

#[given(expr = "a failed {word} payment {word}")]
async fn failed_payment(world: &mut FoodOrderWorld, payment_type: String, label: String) {
    record_payment(world, &payment_type, PaymentStatus::Failure, label).await;
}

async fn record_payment(world: &mut FoodOrderWorld, payment_type: &str, status: PaymentStatus, label: String) {
    let payment_type = payment_type.parse::<PaymentType>().expect("Not a valid payment type");
    let payment =
        world.payment_api().record_payment(NewPayment::new(payment_type, status)).await.expect("Error saving payment");
    world.payments.insert(label, payment);
}

#[given(expr = "a customer {string} signs in with subject {string}")]
async fn existing_customer(world: &mut FoodOrderWorld, name: String, subject: String) {
    sign_in(world, name, subject).await;
}

#[when(expr = "a customer {string} signs in with subject {string}")]
async fn customer_signs_in(world: &mut FoodOrderWorld, name: String, subject: String) {
    sign_in(world, name, subject).await;
}

async fn sign_in(world: &mut FoodOrderWorld, name: String, subject: String) {
    let customer = world.customer_api().customer_for_subject(&subject, &name).await.expect("Error signing in");
    world.customers.insert(name, customer);
}

async fn place_order(
    world: &mut FoodOrderWorld,
    customer: &str,
    item: &str,
    restaurant_id: RestaurantId,
    transaction_id: TransactionId,
) {
    let food_item = item.parse::<FoodItem>().expect("Not a valid food item");
    let caller = world.customer(customer).id.clone();
    let request = OrderRequest::new(food_item, transaction_id, restaurant_id);
    let result = world.orders().place_order(request, caller).await;
    world.last_order = Some(result);
}

#[when(expr = "{word} orders {word} from {word} with payment {word}")]
async fn order_with_payment(
    world: &mut FoodOrderWorld,
    customer: String,
    item: String,
    restaurant: String,
    payment: String,
) {
    order_with_labelled_payment(world, &customer, &item, &restaurant, &payment).await;
}

async fn order_with_labelled_payment(
    world: &mut FoodOrderWorld,
    customer: &str,
    item: &str,
    restaurant: &str,
    payment: &str,
) {
    let restaurant_id = world.restaurant(restaurant).restaurant_id.clone();
    let transaction_id = world.payment(payment).transaction_id.clone();
    place_order(world, customer, item, restaurant_id, transaction_id).await;
}

#[when(expr = "{word} orders {word} from {word} with a new payment")]
async fn order_with_new_payment(world: &mut FoodOrderWorld, customer: String, item: String, restaurant: String) {
    let label = format!("auto-{}", world.payments.len());
    record_payment(world, "UPI", PaymentStatus::Success, label.clone()).await;
    order_with_labelled_payment(world, &customer, &item, &restaurant, &label).await;
    assert!(matches!(world.last_order, Some(Ok(_))), "Order was not placed: {:?}", world.last_order);
}

#[when(expr = "{word} orders {word} from {word} with an unknown payment")]
async fn order_with_unknown_payment(world: &mut FoodOrderWorld, customer: String, item: String, restaurant: String) {
    let restaurant_id = world.restaurant(&restaurant).restaurant_id.clone();
    place_order(world, &customer, &item, restaurant_id, TransactionId::random()).await;
}

#[when(expr = "{word} orders {word} from an unknown restaurant with payment {word}")]
async fn order_from_unknown_restaurant(world: &mut FoodOrderWorld, customer: String, item: String, payment: String) {
    let transaction_id = world.payment(&payment).transaction_id.clone();
    place_order(world, &customer, &item, RestaurantId::random(), transaction_id).await;
}

#[when(expr = "the last order was placed last month")]
async fn backdate_to_last_month(world: &mut FoodOrderWorld) {
    let window = TimeWindow::previous_calendar_month(Utc::now());
    backdate_last_order(world, window.since + Duration::days(10)).await;
}

#[when(expr = "the last order was placed {int} days ago")]
async fn backdate_days(world: &mut FoodOrderWorld, days: i64) {
    backdate_last_order(world, Utc::now() - Duration::days(days)).await;
}

async fn backdate_last_order(world: &mut FoodOrderWorld, when: chrono::DateTime<Utc>) {
    let order = match &world.last_order {
        Some(Ok(order)) => order.clone(),
        other => panic!("There is no placed order to backdate: {other:?}"),
    };
    backdate_order(&world.system().db, &order.order_id, when).await;
}

#[then(expr = "the order is placed")]
async fn order_is_placed(world: &mut FoodOrderWorld) {
    match &world.last_order {
        Some(Ok(_)) => {},
        other => panic!("Expected the order to be placed, but got {other:?}"),
    }
}

#[then(expr = "the order is for {word} from {word} with payment {word} by {word}")]
async fn order_matches(
    world: &mut FoodOrderWorld,
    item: String,
    restaurant: String,
    payment: String,
    customer: String,
) {
    let order = match &world.last_order {
        Some(Ok(order)) => order.clone(),
        other => panic!("Expected the order to be placed, but got {other:?}"),
    };
    assert_eq!(order.food_item.as_str(), item);
    assert_eq!(order.restaurant_id, world.restaurant(&restaurant).restaurant_id);
    assert_eq!(order.transaction_id, world.payment(&payment).transaction_id);
    assert_eq!(order.customer_id, world.customer(&customer).id);
    let stored = world.system().db.fetch_order(&order.order_id).await.expect("Error fetching order");
    assert_eq!(stored, Some(order));
}

#[then(expr = "the order is rejected with {word}")]
async fn order_is_rejected(world: &mut FoodOrderWorld, reason: String) {
    let err = match &world.last_order {
        Some(Err(e)) => e.clone(),
        other => panic!("Expected the order to be rejected, but got {other:?}"),
    };
    let matched = match reason.as_str() {
        "PaymentNotFound" => matches!(err, OrderFlowError::PaymentNotFound(_)),
        "PaymentNotSuccessful" => matches!(err, OrderFlowError::PaymentNotSuccessful(_)),
        "RestaurantNotFound" => matches!(err, OrderFlowError::RestaurantNotFound(_)),
        "ConstraintViolation" => matches!(err, OrderFlowError::ConstraintViolation(_)),
        other => panic!("Unknown rejection reason {other}"),
    };
    assert!(matched, "Expected {reason}, but got {err:?}");
}

#[then(expr = "{word} has {int} order(s)")]
async fn customer_order_count(world: &mut FoodOrderWorld, customer: String, count: usize) {
    let id = world.customer(&customer).id.clone();
    let orders = world.orders().orders_for_customer(&id).await.expect("Error fetching orders");
    assert_eq!(orders.len(), count);
}

#[then(expr = "there are {int} orders in total")]
async fn total_orders(world: &mut FoodOrderWorld, count: usize) {
    let orders = world.system().db.search_orders(OrderQueryFilter::default()).await.expect("Error fetching orders");
    assert_eq!(orders.len(), count);
}

#[then(expr = "there is {int} customer with subject {string}")]
async fn customers_with_subject(world: &mut FoodOrderWorld, count: i64, subject: String) {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE subject_id = $1")
        .bind(&subject)
        .fetch_one(world.system().db.pool())
        .await
        .expect("Error counting customers");
    assert_eq!(n, count);
    let customer = world.system().db.fetch_customer_by_subject(&subject).await.expect("Error fetching customer");
    assert!(customer.is_some());
}

#[then(expr = "the {word} earnings for last month are {int}")]
async fn last_month_earnings(world: &mut FoodOrderWorld, area: String, expected: i64) {
    let area = area.parse::<Area>().expect("Not a valid area");
    let total = world.reports().earnings_last_month(area).await.expect("Error running report");
    assert_eq!(total, Rupees::from(expected));
}

#[then(expr = "the {word} subset earnings are {int}")]
async fn subset_earnings(world: &mut FoodOrderWorld, area: String, expected: i64) {
    let area = area.parse::<Area>().expect("Not a valid area");
    let total = world.reports().subset_earnings(area).await.expect("Error running report");
    assert_eq!(total, Rupees::from(expected));
}

/// Expected customers are given as `name=count` pairs separated by commas, in report order.
#[then(expr = "the top customers are {string}")]
async fn top_customers(world: &mut FoodOrderWorld, expected: String) {
    let rows = world.reports().top_customers().await.expect("Error running report");
    let actual = rows.iter().map(|r| format!("{}={}", r.name, r.orders_count)).collect::<Vec<_>>().join(", ");
    assert_eq!(actual, expected);
}

#[then(expr = "the daily revenue report has {int} row(s)")]
async fn daily_revenue_rows(world: &mut FoodOrderWorld, count: usize) {
    let rows = world.reports().daily_revenue_7days().await.expect("Error running report");
    assert_eq!(rows.len(), count, "{rows:?}");
}

#[then(expr = "the revenue in {word} {int} days ago is {int}")]
async fn daily_revenue_for(world: &mut FoodOrderWorld, area: String, days: i64, expected: i64) {
    let area = area.parse::<Area>().expect("Not a valid area");
    let date = (Utc::now() - Duration::days(days)).date_naive();
    let rows = world.reports().daily_revenue_7days().await.expect("Error running report");
    let row = rows.iter().find(|r| r.area == area && r.date == date);
    match row {
        Some(row) => assert_eq!(row.revenue, Rupees::from(expected)),
        None => assert_eq!(expected, 0, "No revenue row for {area} on {date}: {rows:?}"),
    }
}

/// Expected items are given as `item=count` pairs separated by commas, in report order.
#[then(expr = "the summary for {word} is {string}")]
async fn restaurant_summary(world: &mut FoodOrderWorld, restaurant: String, expected: String) {
    let id = world.restaurant(&restaurant).restaurant_id.clone();
    let rows = world.reports().restaurant_summary(&id).await.expect("Error running report");
    let actual = rows.iter().map(|r| format!("{}={}", r.food_item, r.count)).collect::<Vec<_>>().join(", ");
    assert_eq!(actual, expected);
}
