//! Accounting API requests against a mock backend

mod common;

use serde_json::json;
use wiremock::matchers::{
    body_json, header, header_exists, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, ResponseTemplate};

use common::{ACCESS_TOKEN, TENANT_ID, TestContext};
use xero_gateway_client::{
    ApiError, ContactQuery, HeaderContext, InvoiceBatch, InvoiceLineItem, InvoiceStatus,
    InvoiceUpdate, QuoteQuery, XeroSession, CORRELATION_ID_HEADER, IDEMPOTENCY_KEY_HEADER,
    USER_AGENT,
};

#[tokio::test]
async fn list_contacts_sends_session_and_context_headers() {
    let ctx = TestContext::start().await;
    let session = ctx.session(None).await;
    let headers = HeaderContext::for_read();

    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/Contacts"))
        .and(query_param("summaryOnly", "true"))
        .and(query_param_is_missing("page"))
        .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .and(header("xero-tenant-id", TENANT_ID))
        .and(header("accept", "application/json"))
        .and(header("user-agent", USER_AGENT))
        .and(header(
            CORRELATION_ID_HEADER,
            headers.correlation_id().to_string().as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Contacts": [
                { "ContactID": "c-1", "Name": "Ridgeway University", "ContactStatus": "ACTIVE" }
            ]
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let contacts = require_ok!(
        session
            .accounting()
            .list_contacts(&ContactQuery::default(), &headers)
            .await
    );
    let contacts = contacts.unwrap_or_default();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].name.as_deref(), Some("Ridgeway University"));
    assert_eq!(contacts[0].extra["ContactStatus"], "ACTIVE");
}

#[tokio::test]
async fn list_contacts_passes_page_through() {
    let ctx = TestContext::start().await;
    let session = ctx.session(None).await;

    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/Contacts"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Contacts": [] })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let contacts = require_ok!(
        session
            .list_contacts(&ContactQuery { page: Some(3) }, &HeaderContext::for_read())
            .await
    );
    assert_eq!(contacts, Some(vec![]));
}

#[tokio::test]
async fn missing_collection_is_none() {
    let ctx = TestContext::start().await;
    let session = ctx.session(None).await;

    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/TaxRates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Id": "x" })))
        .mount(&ctx.server)
        .await;

    let rates = require_ok!(session.list_tax_rates(&HeaderContext::for_read()).await);
    assert!(rates.is_none());
}

#[tokio::test]
async fn list_quotes_defaults_to_first_page_and_omits_unset_filters() {
    let ctx = TestContext::start().await;
    let session = ctx.session(None).await;

    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/Quotes"))
        .and(query_param("page", "1"))
        .and(query_param_is_missing("ContactID"))
        .and(query_param_is_missing("QuoteNumber"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Quotes": [{ "QuoteID": "q-1", "QuoteNumber": "QU-0001", "Status": "DRAFT" }]
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let quotes = require_ok!(
        session
            .list_quotes(&QuoteQuery::default(), &HeaderContext::for_read())
            .await
    );
    assert_eq!(quotes.unwrap_or_default()[0].quote_number.as_deref(), Some("QU-0001"));
}

#[tokio::test]
async fn list_quotes_sends_filters() {
    let ctx = TestContext::start().await;
    let session = ctx.session(None).await;

    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/Quotes"))
        .and(query_param("page", "2"))
        .and(query_param("ContactID", "c-9"))
        .and(query_param("QuoteNumber", "QU-0042"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Quotes": [] })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let query = QuoteQuery {
        page: 2,
        contact_id: Some("c-9".to_string()),
        quote_number: Some("QU-0042".to_string()),
    };
    require_ok!(session.list_quotes(&query, &HeaderContext::for_read()).await);
}

#[tokio::test]
async fn get_invoice_returns_first_entry() {
    let ctx = TestContext::start().await;
    let session = ctx.session(None).await;

    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/Invoices/inv-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Invoices": [{ "InvoiceID": "inv-1", "Status": "AUTHORISED", "Total": 230.0 }]
        })))
        .mount(&ctx.server)
        .await;

    let invoice = require_ok!(session.get_invoice("inv-1", &HeaderContext::for_read()).await);
    let invoice = invoice.unwrap_or_else(|| panic!("invoice missing"));
    assert_eq!(invoice.known_status(), Some(InvoiceStatus::Authorised));
    assert_eq!(invoice.extra["Total"], 230.0);
}

#[tokio::test]
async fn get_invoice_404_is_not_found_with_resource() {
    let ctx = TestContext::start().await;
    let session = ctx.session(None).await;

    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/Invoices/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("The resource you're looking for cannot be found"))
        .mount(&ctx.server)
        .await;

    let err = session
        .get_invoice("missing", &HeaderContext::for_read())
        .await
        .unwrap_err();
    assert!(
        matches!(&err, ApiError::NotFound { resource, .. } if resource == "missing"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn update_invoice_posts_single_element_batch_with_idempotency_key() {
    let ctx = TestContext::start().await;
    let session = ctx.session(None).await;

    Mock::given(method("POST"))
        .and(path("/api.xro/2.0/Invoices/inv-7"))
        .and(header_exists(IDEMPOTENCY_KEY_HEADER))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "Invoices": [{
                "LineItems": [{
                    "Description": "Consulting",
                    "Quantity": 2.0,
                    "UnitAmount": 150.0,
                    "AccountCode": "200",
                    "TaxType": "OUTPUT2"
                }],
                "Reference": "PO-7"
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Invoices": [{ "InvoiceID": "inv-7", "Status": "DRAFT", "Reference": "PO-7" }]
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let update = InvoiceUpdate {
        line_items: Some(vec![InvoiceLineItem {
            description: "Consulting".to_string(),
            quantity: 2.0,
            unit_amount: 150.0,
            account_code: "200".to_string(),
            tax_type: "OUTPUT2".to_string(),
        }]),
        reference: Some("PO-7".to_string()),
        due_date: None,
    };

    let updated = require_ok!(
        session
            .update_invoice("inv-7", &InvoiceBatch::single(update), &HeaderContext::for_write())
            .await
    );
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].extra["Reference"], "PO-7");
}

#[tokio::test]
async fn update_invoice_without_echo_returns_empty() {
    let ctx = TestContext::start().await;
    let session = ctx.session(None).await;

    Mock::given(method("POST"))
        .and(path("/api.xro/2.0/Invoices/inv-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Invoices": [] })))
        .mount(&ctx.server)
        .await;

    let updated = require_ok!(
        session
            .update_invoice(
                "inv-7",
                &InvoiceBatch::single(InvoiceUpdate::default()),
                &HeaderContext::for_write()
            )
            .await
    );
    assert!(updated.is_empty());
}

#[tokio::test]
async fn update_invoice_with_blank_body_returns_empty() {
    let ctx = TestContext::start().await;
    let session = ctx.session(None).await;

    Mock::given(method("POST"))
        .and(path("/api.xro/2.0/Invoices/inv-7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let updated = require_ok!(
        session
            .update_invoice(
                "inv-7",
                &InvoiceBatch::single(InvoiceUpdate::default()),
                &HeaderContext::for_write()
            )
            .await
    );
    assert!(updated.is_empty());
}

#[tokio::test]
async fn validation_exception_surfaces_first_message() {
    let ctx = TestContext::start().await;
    let session = ctx.session(None).await;

    Mock::given(method("POST"))
        .and(path("/api.xro/2.0/Invoices/inv-7"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ErrorNumber": 10,
            "Type": "ValidationException",
            "Message": "A validation exception occurred",
            "Elements": [{
                "ValidationErrors": [{ "Message": "Account code '999' is not a valid code for this document." }]
            }]
        })))
        .mount(&ctx.server)
        .await;

    let err = session
        .update_invoice(
            "inv-7",
            &InvoiceBatch::single(InvoiceUpdate::default()),
            &HeaderContext::for_write(),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "[accounting] Validation failed: Account code '999' is not a valid code for this document."
    );
}

#[tokio::test]
async fn rate_limit_is_reported_once_with_retry_after() {
    let ctx = TestContext::start().await;
    let session = ctx.session(None).await;

    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/TaxRates"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "42"))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let err = session
        .list_tax_rates(&HeaderContext::for_read())
        .await
        .unwrap_err();
    assert!(
        matches!(err, ApiError::RateLimited { retry_after: Some(42), .. }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn gateway_error_is_network_error() {
    let ctx = TestContext::start().await;
    let session = ctx.session(None).await;

    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/Contacts"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let err = session
        .list_contacts(&ContactQuery::default(), &HeaderContext::for_read())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NetworkError { .. }));
}

#[tokio::test]
async fn short_code_is_fetched_once_per_session() {
    let ctx = TestContext::start().await;
    let session = ctx.session(None).await;

    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/Organisation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Organisations": [{ "Name": "Demo Company (NZ)", "ShortCode": "!AbC12" }]
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let first = require_ok!(session.short_code(&HeaderContext::for_read()).await);
    let second = require_ok!(session.short_code(&HeaderContext::for_read()).await);
    assert_eq!(first.as_deref(), Some("!AbC12"));
    assert_eq!(first, second);
}

#[tokio::test]
async fn blank_short_code_is_none() {
    let ctx = TestContext::start().await;
    let session = ctx.session(None).await;

    Mock::given(method("GET"))
        .and(path("/api.xro/2.0/Organisation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Organisations": [{ "Name": "Demo Company (NZ)", "ShortCode": "" }]
        })))
        .mount(&ctx.server)
        .await;

    let code = require_ok!(session.short_code(&HeaderContext::for_read()).await);
    assert!(code.is_none());
}
