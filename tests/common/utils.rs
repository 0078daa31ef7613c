use std::path::PathBuf;

use order_form::form::form_model::FormDocument;
use order_form::page::order_page::OrderPage;
use order_form::storage::store::{KeyValueStore, MemoryStore};
use order_form::trace::logger::TraceLogger;
use order_form::validation::gate::SubmissionGate;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn markup() -> FormDocument {
    FormDocument::from_path(&fixture("order_form.yaml")).unwrap()
}

pub fn open_with<S: KeyValueStore>(store: S, gate: SubmissionGate) -> OrderPage<S> {
    OrderPage::open(markup(), store, gate, TraceLogger::disabled()).unwrap()
}

pub fn open_page() -> OrderPage<MemoryStore> {
    open_with(MemoryStore::new(), SubmissionGate::default())
}

/// Fill everything a delivery order paid online needs.
pub fn fill_valid_delivery_online<S: KeyValueStore>(page: &mut OrderPage<S>) {
    page.select("ice-cream-flavor", "vanilla").unwrap();
    page.check("delivery").unwrap();
    page.fill("street", "12 Lygon St").unwrap();
    page.fill("suburb", "Carlton").unwrap();
    page.fill("state", "VIC").unwrap();
    page.fill("postcode", "3053").unwrap();
    page.fill("contact", "0412345678").unwrap();
    page.fill("receipt-email", "jane@example.com").unwrap();
    page.check("pay-online").unwrap();
    page.select("card-type", "visa").unwrap();
    page.fill("card-name", "Jane Citizen").unwrap();
    page.fill("card-number", "4111111111111111").unwrap();
    page.fill("expiry", "2030-04").unwrap();
    page.fill("cvv", "123").unwrap();
}
