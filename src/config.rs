//! Server configuration.

/// Page served to requests that do not ask for an upgrade.
pub const DEFAULT_RESOURCE_BODY: &str =
    "<html><head></head><body><h1>Hello World</h1></body></html>";

/// The configuration for the upgrade server.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ServerConfig {
    /// Value of the `Origin` line in the handshake response. It is not taken
    /// from the request.
    ///
    /// The default value is `localhost:8080`.
    pub origin: String,
    /// Body of the `200 OK` reply to plain resource requests.
    pub resource_body: String,
    /// The maximum size of a request header block.
    ///
    /// The default value is 4 KiB.
    pub max_request_size: usize,
    /// The maximum payload size of a single incoming frame, `None` means no
    /// limit. Larger frames abort the connection before being buffered.
    ///
    /// The default value is 64 KiB.
    pub max_frame_size: Option<usize>,
    /// Capacity of the buffer each frame is decoded into, including the NUL
    /// terminator. Frames with longer payloads abort the connection.
    ///
    /// The default value is 499 bytes: a 512 byte frame minus the largest
    /// header plus the terminator.
    pub text_capacity: usize,
    /// When set to `true`, the server will accept and decode unmasked frames
    /// from the client.
    ///
    /// RFC 6455 requires the server to close the connection in such cases, so
    /// this option defaults to `false`.
    pub accept_unmasked_frames: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            origin: "localhost:8080".to_owned(),
            resource_body: DEFAULT_RESOURCE_BODY.to_owned(),
            max_request_size: 4096,
            max_frame_size: Some(64 << 10),
            text_capacity: 499,
            accept_unmasked_frames: false,
        }
    }
}

impl ServerConfig {
    /// Sets [`Self::origin`].
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Sets [`Self::resource_body`].
    pub fn resource_body(mut self, resource_body: impl Into<String>) -> Self {
        self.resource_body = resource_body.into();
        self
    }

    /// Sets [`Self::max_request_size`].
    pub fn max_request_size(mut self, max_request_size: usize) -> Self {
        self.max_request_size = max_request_size;
        self
    }

    /// Sets [`Self::max_frame_size`].
    pub fn max_frame_size(mut self, max_frame_size: Option<usize>) -> Self {
        self.max_frame_size = max_frame_size;
        self
    }

    /// Sets [`Self::text_capacity`].
    pub fn text_capacity(mut self, text_capacity: usize) -> Self {
        self.text_capacity = text_capacity;
        self
    }

    /// Sets [`Self::accept_unmasked_frames`].
    pub fn accept_unmasked_frames(mut self, accept_unmasked_frames: bool) -> Self {
        self.accept_unmasked_frames = accept_unmasked_frames;
        self
    }
}
