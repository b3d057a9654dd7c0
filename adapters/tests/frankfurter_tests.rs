use std::time::Duration;

use adapters::fx::FrankfurterConverter;
use corelib::CurrencyConverter;
use mockito::Matcher;

fn converter(url: String, ttl: Duration) -> FrankfurterConverter {
    FrankfurterConverter::new(url, Duration::from_secs(2), ttl).unwrap()
}

#[tokio::test]
async fn converts_with_latest_rate_and_caches_it() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/latest")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("from".into(), "USD".into()),
            Matcher::UrlEncoded("to".into(), "GBP".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"amount":1.0,"base":"USD","date":"2020-10-19","rates":{"GBP":0.77}}"#)
        .expect(1)
        .create_async()
        .await;

    let fx = converter(server.url(), Duration::from_secs(3600));
    let first = fx.convert(100.0, "USD", "GBP").await.unwrap();
    let second = fx.convert(10.0, "usd", "gbp").await.unwrap();

    assert!((first - 77.0).abs() < 1e-9);
    assert!((second - 7.7).abs() < 1e-9);
    mock.assert_async().await;
}

#[tokio::test]
async fn same_currency_skips_the_network() {
    let server = mockito::Server::new_async().await;
    let fx = converter(server.url(), Duration::from_secs(60));
    assert_eq!(fx.convert(42.0, "USD", "USD").await.unwrap(), 42.0);
}

#[tokio::test]
async fn missing_rate_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/latest")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"amount":1.0,"base":"USD","date":"2020-10-19","rates":{}}"#)
        .create_async()
        .await;

    let fx = converter(server.url(), Duration::from_secs(60));
    assert!(fx.convert(1.0, "USD", "GBP").await.is_err());
}

#[tokio::test]
async fn error_status_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/latest")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let fx = converter(server.url(), Duration::from_secs(60));
    assert!(fx.convert(1.0, "USD", "GBP").await.is_err());
}
