//! OpenAPI documentation configuration
//!
//! Generates the OpenAPI 3.0 specification for the Castboard API.

use utoipa::OpenApi;

use crate::auth::SigninProof;
use crate::db::{Board, BoardImage, BoardWithImages};
use crate::handlers::{
    CreateBoardRequest, CreateBoardResponse, HealthResponse, PresignedUrlResponse, VerifyResponse,
};

/// Castboard API - OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Castboard API",
        version = "0.1.0",
        description = r#"
## Share image boards on Farcaster

A thin backend for the Castboard client:

- **Sign-in verification** - Farcaster sign-in proofs checked against the auth relay
- **Signed uploads** - short-lived Pinata upload URLs, so image bytes never pass through this service
- **Boards** - create and read named, slugged collections of images owned by a fid
- **Embeds** - preview HTML with `fc:frame` meta tags for link unfurlers

### Authentication

Mutating endpoints and own-boards listings require a `{nonce, message, signature}`
sign-in proof, supplied in the JSON body or the `nonce`/`message`/`signature`
headers. The verified fid is the owner identity for every write.
"#,
        license(
            name = "MIT OR Apache-2.0",
            url = "https://github.com/castboard/castboard-server/blob/main/LICENSE"
        ),
        contact(
            name = "Castboard Team",
            url = "https://github.com/castboard/castboard-server"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    tags(
        (name = "Health", description = "Greeting and service health"),
        (name = "Auth", description = "Sign-in proof verification"),
        (name = "Uploads", description = "Signed upload URL issuance"),
        (name = "Boards", description = "Board creation and lookup"),
        (name = "Embed", description = "Social preview rendering")
    ),
    paths(
        crate::handlers::health::greeting,
        crate::handlers::health::health,
        crate::handlers::uploads::presigned_url_get,
        crate::handlers::uploads::presigned_url_post,
        crate::handlers::verify::verify_handler,
        crate::handlers::boards::create_board_handler,
        crate::handlers::boards::list_boards_handler,
        crate::handlers::boards::list_boards_post_handler,
        crate::handlers::boards::boards_by_fid_handler,
        crate::handlers::boards::get_board_handler,
        crate::handlers::embed::embed_handler,
    ),
    components(
        schemas(
            HealthResponse,
            SigninProof,
            VerifyResponse,
            PresignedUrlResponse,
            CreateBoardRequest,
            CreateBoardResponse,
            Board,
            BoardImage,
            BoardWithImages,
        )
    )
)]
pub struct ApiDoc;
