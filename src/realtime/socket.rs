use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};
use crate::error::ChannelError;
use crate::logging::{console_warn, log};
use crate::models::StartCommand;
use super::channel::{IncomingMessage, RealtimeChannel};
use super::driver::ProtocolDriver;
use super::protocol::DISCONNECT_FRAME;

type MessageHandler = Rc<RefCell<Option<Rc<dyn Fn(IncomingMessage)>>>>;

/// Where a `SocketChannel` delivers inbound messages
///
/// Obtained before the channel is handed to its owner, so the receiver can be
/// installed once the owner exists.
#[derive(Clone)]
pub struct InboundHook(MessageHandler);

impl InboundHook {
    /// Install the receiver, replacing any previous one
    pub fn set(&self, handler: impl Fn(IncomingMessage) + 'static) {
        *self.0.borrow_mut() = Some(Rc::new(handler));
    }
}

/// Realtime channel over a browser `WebSocket`
///
/// Opens the websocket once and never reopens it; a namespace dropped by the
/// server is rejoined over the same socket. Inbound messages go to the
/// receiver installed through `inbound()`; messages arriving before one is
/// installed are dropped.
pub struct SocketChannel {
    socket: WebSocket,
    driver: Rc<RefCell<ProtocolDriver>>,
    handler: MessageHandler,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
}

impl SocketChannel {
    /// Open the websocket
    ///
    /// # Errors
    ///
    /// Returns an error if the browser rejects the URL.
    pub fn connect(url: &str) -> Result<Self, ChannelError> {
        let socket = WebSocket::new(url).map_err(|e| ChannelError::Connect(format!("{e:?}")))?;
        let driver = Rc::new(RefCell::new(ProtocolDriver::new()));
        let handler: MessageHandler = Rc::new(RefCell::new(None));

        let on_message = {
            let socket = socket.clone();
            let driver = Rc::clone(&driver);
            let handler = Rc::clone(&handler);
            Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
                let Some(frame) = event.data().as_string() else {
                    log!("Ignoring binary frame");
                    return;
                };
                let reaction = driver.borrow_mut().on_frame(&frame);
                for outgoing in &reaction.outgoing {
                    send_frame(&socket, outgoing);
                }
                deliver(&handler, reaction.incoming);
            })
        };

        let on_close = {
            let driver = Rc::clone(&driver);
            let handler = Rc::clone(&handler);
            Closure::<dyn FnMut(CloseEvent)>::new(move |event: CloseEvent| {
                log!("Realtime channel closed ({})", event.code());
                let messages = driver.borrow_mut().on_transport_closed();
                deliver(&handler, messages);
            })
        };

        let on_error = {
            let driver = Rc::clone(&driver);
            let handler = Rc::clone(&handler);
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                console_warn!("Realtime channel transport error");
                let messages = driver.borrow_mut().on_transport_error();
                deliver(&handler, messages);
            })
        };

        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        Ok(Self {
            socket,
            driver,
            handler,
            _on_message: on_message,
            _on_close: on_close,
            _on_error: on_error,
        })
    }

    #[must_use]
    pub fn inbound(&self) -> InboundHook {
        InboundHook(Rc::clone(&self.handler))
    }
}

impl RealtimeChannel for SocketChannel {
    fn request_start(&mut self, command: &StartCommand) -> Result<(), ChannelError> {
        let frame = self.driver.borrow_mut().queue_start(command)?;
        if let Some(frame) = frame {
            self.socket
                .send_with_str(&frame)
                .map_err(|e| ChannelError::Send(format!("{e:?}")))?;
        }
        Ok(())
    }

    fn close(&mut self) {
        if self.driver.borrow().is_closed() {
            return;
        }
        if self.driver.borrow().is_connected() {
            send_frame(&self.socket, DISCONNECT_FRAME);
        }

        self.socket.set_onmessage(None);
        self.socket.set_onclose(None);
        self.socket.set_onerror(None);
        let _ = self.socket.close();

        self.driver.borrow_mut().on_transport_closed();
        *self.handler.borrow_mut() = None;
    }
}

impl Drop for SocketChannel {
    fn drop(&mut self) {
        self.close();
    }
}

fn send_frame(socket: &WebSocket, frame: &str) {
    if let Err(e) = socket.send_with_str(frame) {
        console_warn!("Failed to send frame: {:?}", e);
    }
}

/// Hand messages to the installed receiver
///
/// The receiver is taken out of the slot first, so it may replace or clear
/// the slot (e.g. by closing the channel) while it runs.
fn deliver(handler: &MessageHandler, messages: Vec<IncomingMessage>) {
    if messages.is_empty() {
        return;
    }
    let current = handler.borrow().clone();
    let Some(current) = current else { return };
    for message in messages {
        current(message);
    }
}
