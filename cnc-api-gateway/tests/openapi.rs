use cnc_api_gateway::handlers::ApiDoc;
use utoipa::OpenApi;

#[test]
fn test_openapi_lists_every_route() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
    let paths = doc["paths"].as_object().unwrap();

    for path in [
        "/auth/register",
        "/auth/login",
        "/categories",
        "/restaurants/{restaurantId}/products",
        "/restaurants/{restaurantId}/products/{productId}",
        "/restaurants/{restaurantId}/menus",
        "/restaurants/{restaurantId}/menus/{menuId}",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }

    let register = &paths["/auth/register"];
    for method in ["get", "head", "post"] {
        assert!(register.get(method).is_some(), "missing {method} /auth/register");
    }
}

#[test]
fn test_openapi_error_schema() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

    assert!(doc["components"]["schemas"]["ApiErrorResponse"].is_object());
}
