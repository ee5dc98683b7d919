/// Declares a JSON-RPC client struct with one async method per listed node method.
///
/// Every method posts a single call to `url` and decodes the `result` into its return type.
macro_rules! jsonrpc {
    (
        $(#[$struct_attr:meta])*
        pub struct $struct_name:ident {$(
            $(#[$attr:meta])*
            pub fn $method:ident(&$selff:ident $(, $arg_name:ident: $arg_ty:ty)*)
                -> $return_ty:ty;
        )*}
    ) => (
        $(#[$struct_attr])*
        pub struct $struct_name {
            client: reqwest::Client,
            url: reqwest::Url,
            id_generator: $crate::rpc::IdGenerator,
        }

        impl $struct_name {
            pub fn new(client: reqwest::Client, url: reqwest::Url) -> Self {
                $struct_name {
                    client,
                    url,
                    id_generator: $crate::rpc::IdGenerator::default(),
                }
            }

            $(
                $(#[$attr])*
                pub async fn $method(&$selff $(, $arg_name: $arg_ty)*)
                    -> Result<$return_ty, $crate::Error>
                {
                    let params = serialize_parameters!($($arg_name,)*);
                    let call = $crate::rpc::method_call(
                        $selff.id_generator.next(),
                        stringify!($method),
                        params,
                    );
                    let output: jsonrpc_core::Output = $selff
                        .client
                        .post($selff.url.clone())
                        .json(&call)
                        .send()
                        .await?
                        .error_for_status()?
                        .json()
                        .await?;
                    $crate::rpc::decode_output(output)
                }
            )*
        }
    )
}

macro_rules! serialize_parameters {
    () => ( Vec::new() );
    ($($arg_name:ident,)+) => ( vec![$(serde_json::to_value($arg_name)?,)+] )
}
