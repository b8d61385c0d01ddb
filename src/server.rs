//! Accepting connections, answering resource requests and decoding the text
//! frames of upgraded ones.

use std::{net::SocketAddr, rc::Rc};

use monoio::{
    io::{AsyncReadRent, AsyncWriteRent, AsyncWriteRentExt, stream::Stream},
    net::TcpListener,
};
use monoio_codec::FramedRead;
use tracing::{debug, info, warn};

use crate::{
    config::ServerConfig,
    error::{Error, ProtocolError, Result},
    handshake::{
        headers::is_upgrade_request,
        server::{
            HANDSHAKE_RESPONSE_CAPACITY, RequestDecoder, make_handshake_response,
            resource_response,
        },
    },
    protocol::frame::{
        DecodedText, codec::FrameDecoder, coding::OpCode, decode_text, decode_text_lenient,
    },
};

/// The callback trait.
///
/// The callback is called once for every data frame a client sends after the
/// handshake. Each connection works on its own clone.
pub trait Callback {
    /// Called with the decoded payload of one frame.
    fn on_text(&mut self, peer: SocketAddr, text: DecodedText<'_>);
}

/// Callback emitting every decoded frame as a `tracing` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogText;

impl Callback for LogText {
    fn on_text(&mut self, peer: SocketAddr, text: DecodedText<'_>) {
        info!(%peer, len = text.len(), %text, "text frame");
    }
}

/// Accepts connections from `listener` forever, serving each one on its own
/// task.
///
/// A failing connection is logged and dropped without affecting the others.
pub async fn serve<C>(listener: TcpListener, config: ServerConfig, callback: C)
where
    C: Callback + Clone + 'static,
{
    let config = Rc::new(config);

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "failed to accept connection");
                continue;
            }
        };
        debug!(%peer, "accepted connection");

        let config = config.clone();
        let callback = callback.clone();
        monoio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer, &config, callback).await {
                warn!(%peer, error = %e, "connection aborted");
            }
        });
    }
}

/// Serves one connection to completion.
///
/// Reads a request; answers it with the resource page unless it carries
/// `Upgrade: websocket`, in which case the handshake is sent and every
/// following frame is decoded and passed to `callback` until the client
/// sends a close frame or hangs up.
pub async fn handle_connection<S, C>(
    stream: S,
    peer: SocketAddr,
    config: &ServerConfig,
    mut callback: C,
) -> Result<()>
where
    S: AsyncReadRent + AsyncWriteRent,
    C: Callback,
{
    let mut framed = FramedRead::with_capacity(
        stream,
        RequestDecoder::new(config.max_request_size),
        config.max_request_size,
    );

    let request = match framed.next().await {
        Some(Ok(request)) => request,
        // Anything that is not a well-formed upgrade gets the page.
        Some(Err(Error::HttpFormat(e))) => {
            debug!(%peer, error = %e, "unparseable request, serving resource");
            return send_resource(framed.get_mut(), config).await;
        }
        Some(Err(e)) => return Err(e),
        None => return Err(Error::Protocol(ProtocolError::HandshakeIncomplete)),
    };

    if !is_upgrade_request(&request.bytes) {
        debug!(%peer, method = %request.method, path = %request.path, "resource request");
        return send_resource(framed.get_mut(), config).await;
    }

    let mut response = [0u8; HANDSHAKE_RESPONSE_CAPACITY];
    let len = make_handshake_response(&request.bytes, &config.origin, &mut response)?;
    let (res, _) = framed.get_mut().write_all(response[..len].to_vec()).await;
    res?;
    framed.get_mut().flush().await?;
    debug!(%peer, path = %request.path, "websocket handshake completed");

    // Bytes the client sent right after the request stay buffered.
    let mut frames = framed.map_decoder(|_| FrameDecoder::new(config.max_frame_size));
    let mut text = vec![0u8; config.text_capacity];

    while let Some(frame) = frames.next().await {
        let frame = frame?;

        if OpCode::from_first_byte(frame[0]).is_close() {
            debug!(%peer, "close frame received");
            break;
        }

        let len = if config.accept_unmasked_frames {
            decode_text_lenient(&frame, &mut text)?
        } else {
            decode_text(&frame, &mut text)?
        };
        callback.on_text(peer, DecodedText::new(&text[..len]));
    }

    Ok(())
}

async fn send_resource<S: AsyncWriteRent>(stream: &mut S, config: &ServerConfig) -> Result<()> {
    let (res, _) = stream
        .write_all(resource_response(&config.resource_body)?)
        .await;
    res?;
    stream.flush().await?;
    Ok(())
}
