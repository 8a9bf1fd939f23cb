//! In-memory repositories and request helpers shared by the handler tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_categories::{Category, CategoryRepository, CategoryResult};
use domain_products::{Product, ProductRepository, ProductResult, ProductService, UploadSink, handlers};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Default)]
pub struct InMemoryCategories {
    docs: Mutex<Vec<Category>>,
}

impl InMemoryCategories {
    pub fn insert(&self, name: &str) -> ObjectId {
        let category = Category {
            id: ObjectId::new(),
            name: name.to_string(),
            icon: String::new(),
            color: String::new(),
        };
        let id = category.id;
        self.docs.lock().unwrap().push(category);
        id
    }

    pub fn remove(&self, id: ObjectId) {
        self.docs.lock().unwrap().retain(|c| c.id != id);
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn create(&self, category: Category) -> CategoryResult<Category> {
        self.docs.lock().unwrap().push(category.clone());
        Ok(category)
    }

    async fn get_by_id(&self, id: ObjectId) -> CategoryResult<Option<Category>> {
        Ok(self.docs.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self) -> CategoryResult<Vec<Category>> {
        Ok(self.docs.lock().unwrap().clone())
    }

    async fn replace(&self, category: Category) -> CategoryResult<Option<Category>> {
        let mut docs = self.docs.lock().unwrap();
        Ok(docs.iter_mut().find(|c| c.id == category.id).map(|slot| {
            *slot = category.clone();
            category
        }))
    }

    async fn delete(&self, id: ObjectId) -> CategoryResult<bool> {
        let mut docs = self.docs.lock().unwrap();
        let before = docs.len();
        docs.retain(|c| c.id != id);
        Ok(docs.len() < before)
    }

    async fn exists(&self, id: ObjectId) -> CategoryResult<bool> {
        Ok(self.docs.lock().unwrap().iter().any(|c| c.id == id))
    }
}

#[derive(Default)]
pub struct InMemoryProducts {
    docs: Mutex<Vec<Product>>,
}

impl InMemoryProducts {
    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProducts {
    async fn create(&self, product: Product) -> ProductResult<Product> {
        self.docs.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        Ok(self.docs.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, categories: Vec<ObjectId>) -> ProductResult<Vec<Product>> {
        Ok(self
            .docs
            .lock()
            .unwrap()
            .iter()
            .filter(|p| categories.is_empty() || categories.contains(&p.category))
            .cloned()
            .collect())
    }

    async fn replace(&self, product: Product) -> ProductResult<Option<Product>> {
        let mut docs = self.docs.lock().unwrap();
        Ok(docs.iter_mut().find(|p| p.id == product.id).map(|slot| {
            *slot = product.clone();
            product
        }))
    }

    async fn delete(&self, id: ObjectId) -> ProductResult<bool> {
        let mut docs = self.docs.lock().unwrap();
        let before = docs.len();
        docs.retain(|p| p.id != id);
        Ok(docs.len() < before)
    }

    async fn count(&self) -> ProductResult<u64> {
        Ok(self.docs.lock().unwrap().len() as u64)
    }

    async fn list_featured(&self, limit: Option<u64>) -> ProductResult<Vec<Product>> {
        let docs = self.docs.lock().unwrap();
        let featured = docs.iter().filter(|p| p.is_featured).cloned();
        Ok(match limit {
            Some(n) => featured.take(n as usize).collect(),
            None => featured.collect(),
        })
    }

    async fn set_gallery(
        &self,
        id: ObjectId,
        images: Vec<String>,
    ) -> ProductResult<Option<Product>> {
        let mut docs = self.docs.lock().unwrap();
        Ok(docs.iter_mut().find(|p| p.id == id).map(|p| {
            p.images = images;
            p.clone()
        }))
    }
}

pub struct TestApp {
    pub router: Router,
    pub products: Arc<InMemoryProducts>,
    pub categories: Arc<InMemoryCategories>,
}

impl TestApp {
    /// Router over empty stores, uploads going to `upload_dir`.
    pub fn new(upload_dir: &Path) -> Self {
        Self::with_upload_limit(upload_dir, domain_products::DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub fn with_upload_limit(upload_dir: &Path, max_bytes: usize) -> Self {
        let products = Arc::new(InMemoryProducts::default());
        let categories = Arc::new(InMemoryCategories::default());
        let service = ProductService::from_shared(products.clone(), categories.clone());
        let uploads =
            UploadSink::new(upload_dir, "http://shop.test").with_max_bytes(max_bytes);

        Self {
            router: handlers::router(service, uploads),
            products,
            categories,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// One multipart file part: (field name, file name, content type, bytes).
pub type Part<'a> = (&'a str, &'a str, &'a str, &'a [u8]);

const BOUNDARY: &str = "shop-test-boundary";

pub fn multipart_request(method: &str, uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, file_name, content_type, bytes) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Names of the files currently in `dir`.
pub fn files_in(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}
