// @generated
// This file wires up buf-generated protobuf code from proto/vectorstore.proto.
// Note: the prost file already include!()s the tonic file.

pub mod vectorstore {
    include!("generated/vectorstore/vectorstore.rs");
}
