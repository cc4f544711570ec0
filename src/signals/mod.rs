use opentelemetry::KeyValue;

pub(crate) mod log;
pub(crate) mod metric;
mod shutdown;
pub(crate) mod trace;

pub(crate) const SERVICE_NAME: &str = "sample-generator";

/// The resource descriptor shared by all three signal types. Everything else
/// the program emits exists to show that these attributes arrive on the
/// collector side for metrics, logs and traces alike.
pub(crate) fn sample_resource() -> opentelemetry_sdk::Resource {
    opentelemetry_sdk::Resource::builder()
        .with_service_name(SERVICE_NAME)
        .with_attribute(KeyValue::new(
            "resource-attribute-1",
            "resource-attribute-value-1",
        ))
        .with_attribute(
            // https://opentelemetry.io/docs/specs/semconv/attributes-registry/service/
            KeyValue::new("service.version", crate::build::PKG_VERSION),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute(resource: &opentelemetry_sdk::Resource, key: &str) -> Option<String> {
        resource.iter().find_map(|(k, v)| {
            if k.as_str() == key {
                Some(v.as_str().into_owned())
            } else {
                None
            }
        })
    }

    #[test]
    fn test_sample_resource_attributes() {
        let resource = sample_resource();
        assert_eq!(
            attribute(&resource, "service.name").as_deref(),
            Some(SERVICE_NAME)
        );
        assert_eq!(
            attribute(&resource, "resource-attribute-1").as_deref(),
            Some("resource-attribute-value-1")
        );
        assert_eq!(
            attribute(&resource, "service.version").as_deref(),
            Some(crate::build::PKG_VERSION)
        );
    }
}
