// @generated
// This file is @generated by prost-build.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Document {
    #[prost(string, tag = "1")]
    pub page_content: ::prost::alloc::string::String,
    #[prost(map = "string, string", tag = "2")]
    pub metadata: ::std::collections::HashMap<
        ::prost::alloc::string::String,
        ::prost::alloc::string::String,
    >,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct CreateVectorStoreRequest {
    #[prost(string, tag = "1")]
    pub index_name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub text_key: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "3")]
    pub metadata_keys: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct AddDocumentsRequest {
    #[prost(string, tag = "1")]
    pub index_name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub text_key: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "3")]
    pub metadata_keys: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(message, repeated, tag = "4")]
    pub documents: ::prost::alloc::vec::Vec<Document>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct SearchDocumentsRequest {
    #[prost(string, tag = "1")]
    pub query: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub k: u32,
    #[prost(string, tag = "3")]
    pub index_name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub text_key: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "5")]
    pub metadata_keys: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct SearchDocumentsWithFilterRequest {
    #[prost(string, tag = "1")]
    pub query: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub k: u32,
    #[prost(string, tag = "3")]
    pub filter_key: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub filter_value: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub index_name: ::prost::alloc::string::String,
    #[prost(string, tag = "6")]
    pub text_key: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "7")]
    pub metadata_keys: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct DeleteDocumentRequest {
    #[prost(string, tag = "1")]
    pub index_name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub text_key: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "3")]
    pub metadata_keys: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, tag = "4")]
    pub id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct MessageResponse {
    #[prost(string, tag = "1")]
    pub message: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct SearchDocumentsResponse {
    #[prost(message, repeated, tag = "1")]
    pub documents: ::prost::alloc::vec::Vec<Document>,
}
include!("vectorstore.tonic.rs");
