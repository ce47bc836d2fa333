fn main() {
    // Messages are hand-written prost derives in src/pb, so the service is
    // described manually and protoc is not needed at build time.
    let service = tonic_build::manual::Service::builder()
        .name("LaptopService")
        .package("techschool.pcbook")
        .method(
            tonic_build::manual::Method::builder()
                .name("create_laptop")
                .route_name("CreateLaptop")
                .input_type("crate::pb::CreateLaptopRequest")
                .output_type("crate::pb::CreateLaptopResponse")
                .codec_path("tonic::codec::ProstCodec")
                .build(),
        )
        .method(
            tonic_build::manual::Method::builder()
                .name("find_laptop")
                .route_name("FindLaptop")
                .input_type("crate::pb::FindLaptopRequest")
                .output_type("crate::pb::FindLaptopResponse")
                .codec_path("tonic::codec::ProstCodec")
                .build(),
        )
        .method(
            tonic_build::manual::Method::builder()
                .name("search_laptop")
                .route_name("SearchLaptop")
                .input_type("crate::pb::SearchLaptopRequest")
                .output_type("crate::pb::SearchLaptopResponse")
                .codec_path("tonic::codec::ProstCodec")
                .server_streaming()
                .build(),
        )
        .build();

    tonic_build::manual::Builder::new().compile(&[service]);
}
