// Liveness text for `/`; not part of the documented API.
pub async fn root() -> &'static str {
    "accounts is running"
}
